#[macro_use]
extern crate log;

mod error;
pub use error::ConfigError;

pub(crate) mod bands;
pub use bands::{Band, BandTable};

pub(crate) mod thresholds;
pub use thresholds::{
    BloodPressureThresholds, DEFAULT_MAX_GAP, MetricThresholds, SegmentationRules, Thresholds,
    VariabilityRule,
};

pub(crate) mod classify;

pub(crate) mod segmenter;
pub use segmenter::Segmenter;

pub(crate) mod summary;
pub use summary::{DailySummaryBuilder, SUMMARY_LOOKBACK_DAYS, summary_window};

pub mod helpers;
