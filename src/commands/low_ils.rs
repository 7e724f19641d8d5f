use crate::cli::LowIlsArgs;
use crate::summary::{find_low_ils_regions, LowIlsRegion};
use crate::tables::read_windows;
use crate::utils::{open_table_reader, open_table_writer, Delimiter, Result};
use std::io::Write;

pub fn low_ils(args: LowIlsArgs) -> Result<()> {
    let reader = open_table_reader(&args.input_path)?;
    let windows = read_windows(reader, Delimiter::from_path(Some(&args.input_path)))
        .map_err(|e| format!("{}: {}", args.input_path.display(), e))?;
    log::info!("Read {} windows", windows.len());

    let regions = find_low_ils_regions(&windows, args.fraction, args.min_len);
    log::info!("Found {} low-ILS regions", regions.len());

    let output_path = args.output_path.as_deref();
    let mut writer = open_table_writer(output_path)?;
    write_regions(&mut writer, Delimiter::from_path(output_path), &regions)?;
    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

fn write_regions<W: Write>(
    writer: &mut W,
    delimiter: Delimiter,
    regions: &[LowIlsRegion],
) -> Result<()> {
    let write_err = |e: std::io::Error| format!("Failed to write regions: {}", e);
    writeln!(writer, "{}", delimiter.join(["chrom", "analysis", "start", "end"]))
        .map_err(write_err)?;
    for region in regions {
        let line = delimiter.join([
            region.chrom.clone(),
            region.analysis.clone(),
            region.start.to_string(),
            region.end.to_string(),
        ]);
        writeln!(writer, "{}", line).map_err(write_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_as_csv() {
        let regions = vec![LowIlsRegion {
            chrom: "chrX".to_string(),
            analysis: "A_B_C_D".to_string(),
            start: 1_000_000,
            end: 2_500_000,
        }];
        let mut buffer = Vec::new();
        write_regions(&mut buffer, Delimiter::Comma, &regions).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "chrom,analysis,start,end\nchrX,A_B_C_D,1000000,2500000\n"
        );
    }
}
