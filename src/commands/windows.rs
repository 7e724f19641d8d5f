use crate::cli::WindowsArgs;
use crate::summary::aggregate_windows;
use crate::tables::{read_segments, write_windows, SegmentRecord};
use crate::trio::Segment;
use crate::utils::{
    group_in_order, open_table_reader, open_table_writer, ChromSizes, Delimiter, Result,
};
use std::{io::Write, time};

pub fn windows(args: WindowsArgs) -> Result<()> {
    let start_timer = time::Instant::now();

    let chrom_sizes = match &args.chrom_sizes_path {
        Some(path) => Some(ChromSizes::from_path(path)?),
        None => None,
    };

    let mut records: Vec<SegmentRecord> = Vec::new();
    for path in &args.input_paths {
        let reader = open_table_reader(path)?;
        let source = path.display().to_string();
        let table = read_segments(reader, Delimiter::from_path(Some(path)), &source)
            .map_err(|e| format!("{}: {}", source, e))?;
        records.extend(table);
    }

    let mut windows = Vec::new();
    for (chrom, chrom_records) in group_in_order(records, |r| r.chrom.clone()) {
        let chrom_len = match &chrom_sizes {
            Some(sizes) => {
                let len = sizes.get(&chrom);
                if len.is_none() {
                    log::warn!(
                        "No length given for chromosome {}, windows end at the last segment",
                        chrom
                    );
                }
                len
            }
            None => None,
        };
        let segments: Vec<Segment> = chrom_records.into_iter().map(|r| r.segment).collect();
        let chrom_windows = aggregate_windows(&chrom, &segments, args.window_size, chrom_len)?;
        log::debug!("Chromosome {}: {} window records", chrom, chrom_windows.len());
        windows.extend(chrom_windows);
    }

    let output_path = args.output_path.as_deref();
    let mut writer = open_table_writer(output_path)?;
    write_windows(&mut writer, Delimiter::from_path(output_path), &windows)?;
    writer.flush().map_err(|e| e.to_string())?;

    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}
