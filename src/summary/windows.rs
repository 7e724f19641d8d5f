use crate::tables::WindowRecord;
use crate::trio::{Segment, NUM_STATES};
use crate::utils::{group_in_order, Result};

/// Sums the length of each state in consecutive windows of `window_size` bp.
///
/// Windows start at 0 and extend to `chrom_len` when known, otherwise to the
/// furthest segment end on the chromosome, so every analysis gets the same
/// windows. Segments spanning a window boundary contribute to both windows.
/// Records are ordered by analysis (first seen) and then by window start.
pub fn aggregate_windows(
    chrom: &str,
    segments: &[Segment],
    window_size: u64,
    chrom_len: Option<u64>,
) -> Result<Vec<WindowRecord>> {
    if window_size == 0 {
        return Err("Window size must be at least 1".into());
    }

    let max_end = segments.iter().map(|s| s.end).max().unwrap_or(0);
    let limit = match chrom_len {
        Some(len) if len < max_end => {
            log::warn!(
                "Segments on {} end at {}, beyond the chromosome length {}",
                chrom,
                max_end,
                len
            );
            max_end
        }
        Some(len) => len,
        None => max_end,
    };
    let num_windows = limit.div_ceil(window_size) as usize;

    let mut records = Vec::new();
    for (analysis, group) in group_in_order(segments, |s| s.trio.clone()) {
        let mut totals = vec![[0u64; NUM_STATES]; num_windows];
        for segment in group {
            add_segment(&mut totals, segment, window_size);
        }
        records.extend(totals.into_iter().enumerate().map(|(w, totals)| {
            let start = w as u64 * window_size;
            WindowRecord {
                chrom: chrom.to_string(),
                start,
                end: (start + window_size).min(limit),
                analysis: analysis.clone(),
                totals,
            }
        }));
    }
    Ok(records)
}

fn add_segment(totals: &mut [[u64; NUM_STATES]], segment: &Segment, window_size: u64) {
    if segment.is_empty() {
        return;
    }
    let first = segment.start / window_size;
    let last = (segment.end - 1) / window_size;
    for w in first..=last {
        let window_start = w * window_size;
        let overlap_start = segment.start.max(window_start);
        let overlap_end = segment.end.min(window_start + window_size);
        totals[w as usize][segment.state.index()] += overlap_end - overlap_start;
    }
}
