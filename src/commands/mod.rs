pub mod concat;
pub mod low_ils;
pub mod merge;
pub mod segments;
pub mod windows;
