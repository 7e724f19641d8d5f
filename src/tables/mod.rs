mod joint;
mod positions;
mod segments;
mod windows;

pub use joint::write_joint_tables;
pub use positions::{read_positions, STATE_COLUMNS, UNDEFINED_COORDINATE};
pub use segments::{read_segments, write_segments, SegmentRecord, SEGMENT_COLUMNS};
pub use windows::{read_windows, write_windows, WindowRecord, WINDOW_COLUMNS};
