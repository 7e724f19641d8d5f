use super::{
    segment::{Segment, Segments},
    state::StateCall,
};

/// Shared partition of the coordinate axis with one state column per trio.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JointTable {
    pub intervals: Vec<(u64, u64)>,
    pub trios: Vec<String>,
    pub columns: Vec<Vec<StateCall>>,
}

impl JointTable {
    pub fn empty(trios: Vec<String>) -> Self {
        let columns = vec![Vec::new(); trios.len()];
        Self {
            intervals: Vec::new(),
            trios,
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn column(&self, trio: &str) -> Option<&[StateCall]> {
        self.trios
            .iter()
            .position(|t| t == trio)
            .map(|i| self.columns[i].as_slice())
    }

    /// Calls of every trio over the interval at `row`, in trio order.
    pub fn row(&self, row: usize) -> Option<Vec<StateCall>> {
        self.columns
            .iter()
            .map(|column| column.get(row).copied())
            .collect()
    }

    /// Rebuilds one trio's segments from its column: adjacent intervals with the
    /// same known state are joined and undefined intervals are dropped.
    pub fn trio_segments(&self, trio: &str) -> Option<Segments> {
        let column = self.column(trio)?;
        let mut segments = Segments::new();
        for (&(start, end), call) in self.intervals.iter().zip(column) {
            let StateCall::Known(state) = *call else {
                continue;
            };
            match segments.last_mut() {
                Some(last) if last.state == state && last.end == start => last.end = end,
                _ => segments.push(Segment::new(trio, state, start, end)),
            }
        }
        Some(segments)
    }
}
