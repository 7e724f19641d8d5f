use super::{readers::is_gzipped, Result};
use flate2::{write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

pub type TableWriter = BufWriter<Box<dyn Write>>;

/// Opens `path` for writing, gzip-compressed if it ends in `.gz`. Writes to
/// stdout when no path is given.
pub fn open_table_writer(path: Option<&Path>) -> Result<TableWriter> {
    let sink: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
            if is_gzipped(path) {
                Box::new(GzEncoder::new(file, Compression::default()))
            } else {
                Box::new(file)
            }
        }
        None => Box::new(io::stdout()),
    };
    Ok(BufWriter::new(sink))
}

pub fn format_number_with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_every_three_digits() {
        assert_eq!(format_number_with_commas(0), "0");
        assert_eq!(format_number_with_commas(999), "999");
        assert_eq!(format_number_with_commas(1000), "1,000");
        assert_eq!(format_number_with_commas(1234567), "1,234,567");
    }
}
