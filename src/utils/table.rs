use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    /// Comma for `.csv` and `.csv.gz` files, tab otherwise.
    pub fn from_path(path: Option<&Path>) -> Self {
        let name = path
            .map(|p| p.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".csv") {
            Delimiter::Comma
        } else {
            Delimiter::Tab
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
        }
    }

    pub fn split(self, line: &str) -> Vec<&str> {
        line.trim_end_matches(['\r', '\n'])
            .split(self.as_char())
            .collect()
    }

    pub fn join<I, S>(self, fields: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line = String::new();
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                line.push(self.as_char());
            }
            line.push_str(field.as_ref());
        }
        line
    }
}

/// Column names of a delimited table, looked up by name.
#[derive(Debug, Clone, PartialEq)]
pub struct TableHeader {
    pub columns: Vec<String>,
}

impl TableHeader {
    pub fn parse(line: &str, delimiter: Delimiter) -> Self {
        Self {
            columns: delimiter
                .split(line)
                .into_iter()
                .map(|c| c.trim().to_string())
                .collect(),
        }
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Indices of `names`, or an error listing every column that is absent.
    pub fn require(&self, names: &[&str]) -> std::result::Result<Vec<usize>, String> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| self.index(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(format!(
                "missing required column(s): {}",
                missing.join(", ")
            ));
        }
        Ok(names.iter().filter_map(|name| self.index(name)).collect())
    }
}
