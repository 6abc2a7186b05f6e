pub mod sample;
pub use sample::{MetricKind, RawSample, SampleValue, SleepStage};

pub mod segment;
pub use segment::{FieldStats, Segment, SegmentStats, UNKNOWN_CATEGORY};

pub mod summary;
pub use summary::DailySummary;

pub mod thresholds;
pub use thresholds::{
    BandConfig, BloodPressureThresholdConfig, MetricThresholdConfig, RulesConfig,
    SleepThresholdConfig, ThresholdConfig,
};
