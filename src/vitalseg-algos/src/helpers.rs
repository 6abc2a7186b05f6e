pub mod format_hm;
pub mod stats;
