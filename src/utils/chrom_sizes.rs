use crate::utils::{open_table_reader, Result};
use std::{collections::HashMap, io::BufRead, path::Path};

/// Chromosome lengths read from a two-column `chrom length` file. Extra
/// columns are ignored, so a FASTA `.fai` index works as well.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ChromSizes {
    sizes: HashMap<String, u64>,
}

impl ChromSizes {
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = open_table_reader(path)?;
        Self::from_reader(reader).map_err(|e| format!("File {}: {}", path.display(), e))
    }

    #[cfg(test)]
    pub fn new_for_test(sizes: &[(&str, u64)]) -> Self {
        Self {
            sizes: sizes
                .iter()
                .map(|&(chrom, len)| (chrom.to_string(), len))
                .collect(),
        }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut sizes = HashMap::new();

        for (line_number, line) in reader.lines().enumerate() {
            let line =
                line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let chrom = parts
                .next()
                .ok_or(format!("Missing chromosome/length at line {}", line_number + 1))?;
            let len_str = parts
                .next()
                .ok_or(format!("Missing chromosome/length at line {}", line_number + 1))?;
            let len = len_str.parse::<u64>().map_err(|e| {
                format!("Invalid length at line {}, {}: {}", line_number + 1, len_str, e)
            })?;

            if sizes.contains_key(chrom) {
                Err(format!(
                    "Duplicate chromosome entry at line {}: {}",
                    line_number + 1,
                    chrom
                ))?
            } else {
                sizes.insert(chrom.to_string(), len);
            }
        }

        Ok(Self { sizes })
    }

    pub fn get(&self, chrom: &str) -> Option<u64> {
        self.sizes.get(chrom).copied()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrom_sizes_from_reader() {
        let data = "\
chr1\t248956422\n\
chr22\t50818468\t12345\t60\t61\n\
\n\
chrX 156040895\n";
        let reader = std::io::Cursor::new(data);
        let sizes = ChromSizes::from_reader(reader).unwrap();
        assert_eq!(sizes.len(), 3);
        assert_eq!(sizes.get("chr1"), Some(248956422));
        assert_eq!(sizes.get("chr22"), Some(50818468));
        assert_eq!(sizes.get("chrX"), Some(156040895));
        assert_eq!(sizes.get("chrY"), None);
    }

    #[test]
    fn test_chrom_sizes_incomplete_line() {
        let reader = std::io::Cursor::new("chr1 100\nchr2\n");
        assert!(ChromSizes::from_reader(reader).is_err());
    }

    #[test]
    fn test_chrom_sizes_invalid_length() {
        let reader = std::io::Cursor::new("chr1 100\nchr2 -5\n");
        assert!(ChromSizes::from_reader(reader).is_err());
    }

    #[test]
    fn test_chrom_sizes_duplicate() {
        let reader = std::io::Cursor::new("chr1 100\nchr1 200\n");
        assert_eq!(
            ChromSizes::from_reader(reader),
            Err("Duplicate chromosome entry at line 2: chr1".to_string())
        );
    }

    #[test]
    fn test_chrom_sizes_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome.fa.fai");
        std::fs::write(&path, "chr2\t242193529\t1\t60\t61\n").unwrap();
        let sizes = ChromSizes::from_path(&path).unwrap();
        assert_eq!(sizes.get("chr2"), Some(242193529));
        assert_eq!(ChromSizes::new_for_test(&[("chr2", 242193529)]), sizes);
    }
}
