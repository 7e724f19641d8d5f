use std::{fmt, str::FromStr};

pub const NUM_STATES: usize = 4;

/// Hidden state of a trio at a reference position. States `V0` and `V1` are
/// the concordant histories, `V2` and `V3` the two discordant (ILS) ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    V0,
    V1,
    V2,
    V3,
}

impl State {
    pub const ALL: [State; NUM_STATES] = [State::V0, State::V1, State::V2, State::V3];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            State::V0 => "V0",
            State::V1 => "V1",
            State::V2 => "V2",
            State::V3 => "V3",
        }
    }

    /// Index of the highest score; ties go to the lowest index.
    /// Returns `None` if any score is NaN.
    pub fn argmax(scores: &[f64; NUM_STATES]) -> Option<Self> {
        if scores.iter().any(|s| s.is_nan()) {
            return None;
        }
        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = i;
            }
        }
        Self::from_index(best)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for State {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V0" => Ok(State::V0),
            "V1" => Ok(State::V1),
            "V2" => Ok(State::V2),
            "V3" => Ok(State::V3),
            _ => Err(format!("must be one of V0, V1, V2 or V3, got '{}'", s)),
        }
    }
}

/// State of one trio over one elementary interval of the joint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateCall {
    Known(State),
    Undefined,
}

impl StateCall {
    pub const UNDEFINED_LABEL: &'static str = ".";

    pub fn state(self) -> Option<State> {
        match self {
            StateCall::Known(state) => Some(state),
            StateCall::Undefined => None,
        }
    }
}

impl From<Option<State>> for StateCall {
    fn from(state: Option<State>) -> Self {
        state.map_or(StateCall::Undefined, StateCall::Known)
    }
}

impl fmt::Display for StateCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateCall::Known(state) => state.fmt(f),
            StateCall::Undefined => f.write_str(Self::UNDEFINED_LABEL),
        }
    }
}
