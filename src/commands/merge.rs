use crate::cli::MergeArgs;
use crate::tables::{read_segments, write_joint_tables, SegmentRecord};
use crate::trio::{merge_trios, JointTable, Segments};
use crate::utils::{
    format_number_with_commas, group_in_order, open_table_reader, open_table_writer, Delimiter,
    Result,
};
use rayon::ThreadPoolBuilder;
use std::{collections::HashMap, io::Write, path::PathBuf, time};

pub fn merge(args: MergeArgs) -> Result<()> {
    let start_timer = time::Instant::now();

    let records = load_segment_tables(&args.input_paths)?;
    let trios: Vec<String> = group_in_order(records.iter(), |r| r.segment.trio.clone())
        .into_iter()
        .map(|(trio, _)| trio)
        .collect();
    log::info!(
        "Loaded {} segments of {} trio(s) from {} file(s)",
        format_number_with_commas(records.len()),
        trios.len(),
        args.input_paths.len()
    );

    let pool = ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .build()
        .map_err(|e| format!("Failed to build thread pool: {}", e))?;
    let tables = pool.install(|| merge_by_chrom(records, &trios))?;

    let num_rows: usize = tables.iter().map(|(_, table)| table.len()).sum();
    if num_rows == 0 {
        log::warn!("Joint table is empty");
    }

    let output_path = args.output_path.as_deref();
    let mut writer = open_table_writer(output_path)?;
    write_joint_tables(&mut writer, Delimiter::from_path(output_path), &trios, &tables)?;
    writer.flush().map_err(|e| e.to_string())?;

    log::info!(
        "Wrote {} intervals over {} chromosome(s)",
        format_number_with_commas(num_rows),
        tables.len()
    );
    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}

fn load_segment_tables(paths: &[PathBuf]) -> Result<Vec<SegmentRecord>> {
    let mut records = Vec::new();
    for path in paths {
        let reader = open_table_reader(path)?;
        let source = path.display().to_string();
        let table = read_segments(reader, Delimiter::from_path(Some(path)), &source)
            .map_err(|e| format!("{}: {}", source, e))?;
        log::debug!("{}: {} segments", source, table.len());
        records.extend(table);
    }
    Ok(records)
}

/// Runs the merger once per chromosome. Every table gets a column for each of
/// `trios`, empty when the trio has no segments on that chromosome.
fn merge_by_chrom(
    records: Vec<SegmentRecord>,
    trios: &[String],
) -> Result<Vec<(String, JointTable)>> {
    let trio_index: HashMap<&str, usize> = trios
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();
    let mut tables = Vec::new();
    for (chrom, chrom_records) in group_in_order(records, |r| r.chrom.clone()) {
        let mut by_trio: Vec<(String, Segments)> =
            trios.iter().map(|t| (t.clone(), Segments::new())).collect();
        for record in chrom_records {
            let index = trio_index
                .get(record.segment.trio.as_str())
                .copied()
                .ok_or_else(|| format!("Unexpected trio {}", record.segment.trio))?;
            by_trio[index].1.push(record.segment);
        }

        let table = merge_trios(&by_trio).map_err(|e| format!("Chromosome {}: {}", chrom, e))?;
        log::info!(
            "Chromosome {}: {} elementary intervals",
            chrom,
            format_number_with_commas(table.len())
        );
        tables.push((chrom, table));
    }
    Ok(tables)
}
