mod error;
pub mod extract;
pub mod joint_table;
pub mod merge;
pub mod segment;
pub mod state;

pub use error::TrioError;
pub use extract::extract_segments;
pub use joint_table::JointTable;
pub use merge::merge_trios;
pub use segment::{PositionRow, Segment, Segments};
pub use state::{State, StateCall, NUM_STATES};
