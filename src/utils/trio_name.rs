use crate::utils::Result;
use std::path::Path;

/// Trio and chromosome encoded in a hidden-state file name of the form
/// `sp1_sp2_sp3_outgroup_<tag>_<chrom>.<ext>`, e.g.
/// `Homo_Pan_Gorilla_Pongo_chr_22.tsv` gives analysis `Homo_Pan_Gorilla_Pongo`
/// and chromosome `22`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrioName {
    pub species: [String; 4],
    pub chrom: String,
}

impl TrioName {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| format!("Not a file path: {}", path.display()))?;
        let stem = file_name.split('.').next().unwrap_or_default();
        Self::from_stem(stem)
    }

    pub fn from_stem(stem: &str) -> Result<Self> {
        let error_msg = || {
            format!(
                "Invalid trio file name: {} (expected sp1_sp2_sp3_outgroup_tag_chrom)",
                stem
            )
        };
        let elements: Vec<&str> = stem.split('_').collect();
        if elements.len() != 6 || elements.iter().any(|e| e.is_empty()) {
            return Err(error_msg());
        }

        Ok(Self {
            species: [
                elements[0].to_string(),
                elements[1].to_string(),
                elements[2].to_string(),
                elements[3].to_string(),
            ],
            chrom: elements[5].to_string(),
        })
    }

    /// Analysis identifier: the three focal species and the outgroup joined by `_`.
    pub fn analysis(&self) -> String {
        self.species.join("_")
    }
}
