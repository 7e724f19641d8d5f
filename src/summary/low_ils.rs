use crate::tables::WindowRecord;
use crate::utils::group_in_order;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq)]
pub struct LowIlsRegion {
    pub chrom: String,
    pub analysis: String,
    pub start: u64,
    pub end: u64,
}

/// Finds runs of windows whose ILS proportion is at most `fraction` times the
/// mean proportion over all windows, keeping runs longer than `min_len` bp.
///
/// Windows without any covered bases have no proportion; they are left out of
/// the mean and never count as low. Runs never cross a chromosome or analysis.
pub fn find_low_ils_regions(
    windows: &[WindowRecord],
    fraction: f64,
    min_len: u64,
) -> Vec<LowIlsRegion> {
    let props: Vec<f64> = windows.iter().filter_map(WindowRecord::prop_ils).collect();
    if props.is_empty() {
        log::warn!("No window has any covered bases, no low-ILS regions reported");
        return Vec::new();
    }
    let mean = props.iter().sum::<f64>() / props.len() as f64;
    let threshold = mean * fraction;
    log::info!(
        "Mean ILS proportion {:.4} over {} windows, low-ILS threshold {:.4}",
        mean,
        props.len(),
        threshold
    );

    let is_low = |w: &WindowRecord| w.prop_ils().is_some_and(|p| p <= threshold);

    let mut regions = Vec::new();
    let groups = group_in_order(windows, |w| (w.chrom.clone(), w.analysis.clone()));
    for ((chrom, analysis), mut group) in groups {
        group.sort_by_key(|w| w.start);
        for (low, run) in &group.into_iter().chunk_by(|w| is_low(*w)) {
            if !low {
                continue;
            }
            let run: Vec<&WindowRecord> = run.collect();
            let start = run.iter().map(|w| w.start).min().unwrap_or(0);
            let end = run.iter().map(|w| w.end).max().unwrap_or(0);
            if end - start > min_len {
                regions.push(LowIlsRegion {
                    chrom: chrom.clone(),
                    analysis: analysis.clone(),
                    start,
                    end,
                });
            }
        }
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(chrom: &str, analysis: &str, start: u64, totals: [u64; 4]) -> WindowRecord {
        WindowRecord {
            chrom: chrom.to_string(),
            start,
            end: start + 100,
            analysis: analysis.to_string(),
            totals,
        }
    }

    #[test]
    fn low_runs_are_collapsed() {
        // prop_ils: 0.5, 0.0, 0.0, 0.5, 0.0 -> mean 0.2, threshold 0.1
        let windows = vec![
            window("chr1", "A", 0, [50, 0, 25, 25]),
            window("chr1", "A", 100, [100, 0, 0, 0]),
            window("chr1", "A", 200, [60, 40, 0, 0]),
            window("chr1", "A", 300, [50, 0, 50, 0]),
            window("chr1", "A", 400, [100, 0, 0, 0]),
        ];
        let regions = find_low_ils_regions(&windows, 0.5, 100);
        assert_eq!(
            regions,
            vec![LowIlsRegion {
                chrom: "chr1".to_string(),
                analysis: "A".to_string(),
                start: 100,
                end: 300,
            }]
        );
    }

    #[test]
    fn empty_windows_are_never_low() {
        let windows = vec![
            window("chr1", "A", 0, [0, 0, 50, 50]),
            window("chr1", "A", 100, [0, 0, 0, 0]),
            window("chr1", "A", 200, [100, 0, 0, 0]),
        ];
        let regions = find_low_ils_regions(&windows, 0.2, 0);
        assert_eq!(regions.len(), 1);
        assert_eq!((regions[0].start, regions[0].end), (200, 300));
    }

    #[test]
    fn runs_do_not_cross_analyses() {
        let windows = vec![
            window("chr1", "A", 0, [0, 0, 100, 0]),
            window("chr1", "A", 100, [100, 0, 0, 0]),
            window("chr1", "B", 0, [100, 0, 0, 0]),
            window("chr1", "B", 100, [0, 100, 0, 0]),
        ];
        let regions = find_low_ils_regions(&windows, 1.0, 0);
        let spans: Vec<(&str, u64, u64)> = regions
            .iter()
            .map(|r| (r.analysis.as_str(), r.start, r.end))
            .collect();
        assert_eq!(spans, vec![("A", 100, 200), ("B", 0, 200)]);
    }

    #[test]
    fn short_runs_are_dropped() {
        let windows = vec![
            window("chr1", "A", 0, [0, 0, 100, 0]),
            window("chr1", "A", 100, [100, 0, 0, 0]),
        ];
        assert!(find_low_ils_regions(&windows, 1.0, 100).is_empty());
        assert_eq!(find_low_ils_regions(&windows, 1.0, 99).len(), 1);
    }

    #[test]
    fn no_coverage_no_regions() {
        let windows = vec![window("chr1", "A", 0, [0, 0, 0, 0])];
        assert!(find_low_ils_regions(&windows, 0.2, 0).is_empty());
    }
}
