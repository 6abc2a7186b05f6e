//! Threshold configuration as it appears on disk.
//!
//! These types only describe the JSON shape. They are validated into
//! immutable lookup tables by `vitalseg_algos::Thresholds` before use.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIORITY: f64 = 10.0;

fn default_priority() -> f64 {
    DEFAULT_PRIORITY
}

/// Named numeric range. A missing bound is open-ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Lower wins when a value band and a deviation band compete.
    #[serde(default = "default_priority")]
    pub priority: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gap_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_duration_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_dev_threshold: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricThresholdConfig {
    pub categories: Vec<BandConfig>,
    #[serde(default)]
    pub deviation_categories: Vec<BandConfig>,
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureThresholdConfig {
    pub systolic: Vec<BandConfig>,
    pub diastolic: Vec<BandConfig>,
    #[serde(default)]
    pub deviation_categories: Vec<BandConfig>,
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepThresholdConfig {
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub heart_rate: MetricThresholdConfig,
    pub spo2: MetricThresholdConfig,
    pub blood_pressure: BloodPressureThresholdConfig,
    #[serde(default)]
    pub sleep: SleepThresholdConfig,
}

impl BandConfig {
    pub fn new(name: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }
}
