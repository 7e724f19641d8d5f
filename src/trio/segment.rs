use super::state::{State, NUM_STATES};

/// One reference position with the posterior scores of the four states.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    pub coordinate: u64,
    pub scores: [f64; NUM_STATES],
}

impl PositionRow {
    pub fn new(coordinate: u64, scores: [f64; NUM_STATES]) -> Self {
        Self { coordinate, scores }
    }
}

/// Maximal constant-state run of contiguous reference positions; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub trio: String,
    pub state: State,
    pub start: u64,
    pub end: u64,
}

impl Segment {
    pub fn new(trio: impl Into<String>, state: State, start: u64, end: u64) -> Self {
        Self {
            trio: trio.into(),
            state,
            start,
            end,
        }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, position: u64) -> bool {
        self.start <= position && position < self.end
    }
}

pub type Segments = Vec<Segment>;
