mod low_ils;
mod windows;

pub use low_ils::{find_low_ils_regions, LowIlsRegion};
pub use windows::aggregate_windows;
