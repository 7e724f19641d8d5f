use super::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read as ioRead};
use std::path::Path;

pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

pub fn open_table_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::{BufRead, Write};

    #[test]
    fn read_plain_and_gzipped_tables() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("table.tsv");
        std::fs::write(&plain, "a\tb\n1\t2\n").unwrap();
        let lines: Vec<String> = open_table_reader(&plain)
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a\tb", "1\t2"]);

        let gzipped = dir.path().join("table.tsv.gz");
        let mut encoder = GzEncoder::new(File::create(&gzipped).unwrap(), Compression::default());
        encoder.write_all(b"a\tb\n3\t4\n").unwrap();
        encoder.finish().unwrap();
        let lines: Vec<String> = open_table_reader(&gzipped)
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a\tb", "3\t4"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(open_table_reader(Path::new("/nonexistent/table.tsv")).is_err());
    }
}
