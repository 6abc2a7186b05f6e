#[macro_use]
extern crate log;

mod loader;
pub use loader::{load_samples, load_segment, load_thresholds};

mod report;
pub use report::SegmentTable;
