use crate::cli::ConcatArgs;
use crate::utils::{open_table_reader, open_table_writer, Delimiter, Result, TableHeader};
use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

pub fn concat(args: ConcatArgs) -> Result<()> {
    let output_path = args.output_path.as_deref();
    let mut writer = open_table_writer(output_path)?;
    let num_rows = concat_tables(
        &args.input_paths,
        &mut writer,
        Delimiter::from_path(output_path),
    )?;
    writer.flush().map_err(|e| e.to_string())?;
    log::info!(
        "Concatenated {} rows from {} tables",
        num_rows,
        args.input_paths.len()
    );
    Ok(())
}

/// Copies the rows of every table below a single header, converting delimiters
/// as needed. All tables must have the same columns in the same order; an empty
/// file counts as a table without header or rows.
fn concat_tables<W: Write>(
    paths: &[PathBuf],
    writer: &mut W,
    out_delimiter: Delimiter,
) -> Result<usize> {
    let write_err = |e: std::io::Error| format!("Failed to write table: {}", e);
    let mut header: Option<(TableHeader, &Path)> = None;
    let mut num_rows = 0;

    for path in paths {
        let delimiter = Delimiter::from_path(Some(path));
        let mut lines = open_table_reader(path)?.lines();
        let header_line = match lines.next() {
            Some(line) => line.map_err(|e| format!("{}: {}", path.display(), e))?,
            None => {
                log::warn!("Skipping empty table {}", path.display());
                continue;
            }
        };
        let this_header = TableHeader::parse(&header_line, delimiter);
        match &header {
            Some((first, first_path)) => {
                if *first != this_header {
                    return Err(format!(
                        "Header of {} does not match header of {}",
                        path.display(),
                        first_path.display()
                    ));
                }
            }
            None => {
                writeln!(writer, "{}", out_delimiter.join(&this_header.columns))
                    .map_err(write_err)?;
                header = Some((this_header, path.as_path()));
            }
        }

        for line in lines {
            let line = line.map_err(|e| format!("{}: {}", path.display(), e))?;
            if line.is_empty() {
                continue;
            }
            writeln!(writer, "{}", out_delimiter.join(delimiter.split(&line)))
                .map_err(write_err)?;
            num_rows += 1;
        }
    }
    Ok(num_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_mixed_delimiters() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.tsv");
        let b = dir.path().join("b.csv");
        let empty = dir.path().join("empty.tsv");
        std::fs::write(&a, "chrom\tanalysis\tstart\tend\n1\tX\t0\t10\n").unwrap();
        std::fs::write(&b, "chrom,analysis,start,end\n2,Y,5,15\n\n2,Y,20,30\n").unwrap();
        std::fs::write(&empty, "").unwrap();

        let mut buffer = Vec::new();
        let rows = concat_tables(&[a, empty, b], &mut buffer, Delimiter::Comma).unwrap();
        assert_eq!(rows, 3);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "chrom,analysis,start,end\n1,X,0,10\n2,Y,5,15\n2,Y,20,30\n"
        );
    }

    #[test]
    fn concat_rejects_mismatched_headers() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.tsv");
        let b = dir.path().join("b.tsv");
        std::fs::write(&a, "chrom\tstart\tend\n").unwrap();
        std::fs::write(&b, "chrom\tend\tstart\n").unwrap();

        let mut buffer = Vec::new();
        let err = concat_tables(&[a, b.clone()], &mut buffer, Delimiter::Tab).unwrap_err();
        assert!(err.starts_with(&format!("Header of {}", b.display())));
    }
}
