use crate::cli::SegmentsArgs;
use crate::tables::{read_positions, write_segments};
use crate::trio::extract_segments;
use crate::utils::{
    format_number_with_commas, open_table_reader, open_table_writer, Delimiter, Result, TrioName,
};
use std::{io::Write, time};

pub fn segments(args: SegmentsArgs) -> Result<()> {
    let start_timer = time::Instant::now();

    let (trio, chrom) = match (args.trio, args.chrom) {
        (Some(trio), Some(chrom)) => (trio, chrom),
        (trio, chrom) => {
            let name = TrioName::from_path(&args.input_path)
                .map_err(|e| format!("{}. Provide --trio and --chrom instead", e))?;
            (
                trio.unwrap_or_else(|| name.analysis()),
                chrom.unwrap_or(name.chrom),
            )
        }
    };
    log::info!("Extracting segments of trio {} on chromosome {}", trio, chrom);

    let reader = open_table_reader(&args.input_path)?;
    let in_delimiter = Delimiter::from_path(Some(&args.input_path));
    let rows = read_positions(reader, in_delimiter, &trio, &args.coordinate_column)?;
    let segments = extract_segments(&trio, &rows)?;
    if segments.is_empty() {
        log::warn!("No positions defined in the reference for trio {}", trio);
    }
    log::info!(
        "{} positions collapsed into {} segments",
        format_number_with_commas(rows.len()),
        format_number_with_commas(segments.len())
    );

    let output_path = args.output_path.as_deref();
    let mut writer = open_table_writer(output_path)?;
    write_segments(&mut writer, Delimiter::from_path(output_path), &chrom, &segments)?;
    writer.flush().map_err(|e| e.to_string())?;

    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}
