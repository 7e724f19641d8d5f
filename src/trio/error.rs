use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TrioError {
    /// Missing columns, unparsable fields, unsorted coordinates or NaN scores.
    MalformedInput {
        trio: String,
        row: usize,
        reason: String,
    },
    /// A state label outside of `V0..V3`.
    InconsistentStateDomain {
        trio: String,
        row: usize,
        label: String,
    },
}

impl TrioError {
    pub fn malformed(trio: &str, row: usize, reason: impl Into<String>) -> Self {
        TrioError::MalformedInput {
            trio: trio.to_string(),
            row,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TrioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrioError::MalformedInput { trio, row, reason } => {
                write!(f, "Malformed input for trio {} at row {}: {}", trio, row, reason)
            }
            TrioError::InconsistentStateDomain { trio, row, label } => write!(
                f,
                "Unknown state '{}' for trio {} at row {}: expected one of V0, V1, V2, V3",
                label, trio, row
            ),
        }
    }
}

impl std::error::Error for TrioError {}

impl From<TrioError> for String {
    fn from(err: TrioError) -> Self {
        err.to_string()
    }
}
