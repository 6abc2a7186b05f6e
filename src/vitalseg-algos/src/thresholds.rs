use chrono::TimeDelta;
use vitalseg_types::{
    BandConfig, BloodPressureThresholdConfig, MetricKind, MetricThresholdConfig, RulesConfig,
    SleepThresholdConfig, ThresholdConfig,
};

use crate::{BandTable, ConfigError};

pub const DEFAULT_MAX_GAP: TimeDelta = TimeDelta::minutes(10);

/// Split once a segment spanning `min_duration` would reach `std_dev_threshold`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariabilityRule {
    pub min_duration: TimeDelta,
    pub std_dev_threshold: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentationRules {
    pub max_gap: TimeDelta,
    pub max_duration: Option<TimeDelta>,
    pub variability: Option<VariabilityRule>,
}

impl Default for SegmentationRules {
    fn default() -> Self {
        Self::with_gap(DEFAULT_MAX_GAP)
    }
}

impl SegmentationRules {
    pub fn with_gap(max_gap: TimeDelta) -> Self {
        Self {
            max_gap,
            max_duration: None,
            variability: None,
        }
    }

    pub fn max_duration(mut self, max_duration: TimeDelta) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    pub fn variability(mut self, min_duration: TimeDelta, std_dev_threshold: f64) -> Self {
        self.variability = Some(VariabilityRule {
            min_duration,
            std_dev_threshold,
        });
        self
    }

    fn from_config(table: &str, config: &RulesConfig) -> Result<Self, ConfigError> {
        let max_gap = match config.max_gap_minutes {
            Some(minutes) => positive_span(table, "max_gap_minutes", minutes, 60.0)?,
            None => DEFAULT_MAX_GAP,
        };

        let max_duration = config
            .max_duration_hours
            .map(|hours| positive_span(table, "max_duration_hours", hours, 3600.0))
            .transpose()?;

        let variability = match (config.min_duration_hours, config.std_dev_threshold) {
            (_, Some(threshold)) if !(threshold.is_finite() && threshold >= 0.0) => {
                return Err(ConfigError::Negative {
                    table: table.to_owned(),
                    field: "std_dev_threshold",
                    value: threshold,
                });
            }
            (Some(hours), Some(std_dev_threshold)) => Some(VariabilityRule {
                min_duration: non_negative_span(table, "min_duration_hours", hours, 3600.0)?,
                std_dev_threshold,
            }),
            (None, Some(std_dev_threshold)) => Some(VariabilityRule {
                min_duration: TimeDelta::zero(),
                std_dev_threshold,
            }),
            (Some(_), None) => {
                return Err(ConfigError::IncompleteVariability {
                    table: table.to_owned(),
                });
            }
            (None, None) => None,
        };

        Ok(Self {
            max_gap,
            max_duration,
            variability,
        })
    }
}

fn non_negative_span(
    table: &str,
    field: &'static str,
    value: f64,
    seconds_per_unit: f64,
) -> Result<TimeDelta, ConfigError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::Negative {
            table: table.to_owned(),
            field,
            value,
        });
    }
    Ok(TimeDelta::milliseconds(
        (value * seconds_per_unit * 1000.0).round() as i64,
    ))
}

fn positive_span(
    table: &str,
    field: &'static str,
    value: f64,
    seconds_per_unit: f64,
) -> Result<TimeDelta, ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NonPositive {
            table: table.to_owned(),
            field,
            value,
        });
    }
    non_negative_span(table, field, value, seconds_per_unit)
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricThresholds {
    pub categories: BandTable,
    pub deviation: BandTable,
    pub rules: SegmentationRules,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BloodPressureThresholds {
    pub systolic: BandTable,
    pub diastolic: BandTable,
    pub deviation: BandTable,
    pub rules: SegmentationRules,
}

/// Validated, immutable classification tables. Build once at start-up and
/// hand a reference to every [`crate::Segmenter`].
#[derive(Clone, Debug, PartialEq)]
pub struct Thresholds {
    pub heart_rate: MetricThresholds,
    pub spo2: MetricThresholds,
    pub blood_pressure: BloodPressureThresholds,
    pub sleep: SegmentationRules,
}

impl MetricThresholds {
    fn from_config(table: &str, config: &MetricThresholdConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            categories: BandTable::covering(table, &config.categories)?,
            deviation: BandTable::partial(&format!("{table}.deviation"), &config.deviation_categories)?,
            rules: SegmentationRules::from_config(table, &config.rules)?,
        })
    }
}

impl BloodPressureThresholds {
    fn from_config(config: &BloodPressureThresholdConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            systolic: BandTable::covering("blood_pressure.systolic", &config.systolic)?,
            diastolic: BandTable::covering("blood_pressure.diastolic", &config.diastolic)?,
            deviation: BandTable::partial(
                "blood_pressure.deviation",
                &config.deviation_categories,
            )?,
            rules: SegmentationRules::from_config("blood_pressure", &config.rules)?,
        })
    }
}

impl TryFrom<&ThresholdConfig> for Thresholds {
    type Error = ConfigError;

    fn try_from(config: &ThresholdConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            heart_rate: MetricThresholds::from_config("heart_rate", &config.heart_rate)?,
            spo2: MetricThresholds::from_config("spo2", &config.spo2)?,
            blood_pressure: BloodPressureThresholds::from_config(&config.blood_pressure)?,
            sleep: SegmentationRules::from_config("sleep", &config.sleep.rules)?,
        })
    }
}

impl TryFrom<ThresholdConfig> for Thresholds {
    type Error = ConfigError;

    fn try_from(config: ThresholdConfig) -> Result<Self, Self::Error> {
        Self::try_from(&config)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::try_from(Self::default_config()).expect("built-in thresholds are valid")
    }
}

impl Thresholds {
    /// Same tables, with every metric's gap replaced.
    pub fn with_max_gap(mut self, max_gap: TimeDelta) -> Self {
        self.heart_rate.rules.max_gap = max_gap;
        self.spo2.rules.max_gap = max_gap;
        self.blood_pressure.rules.max_gap = max_gap;
        self.sleep.max_gap = max_gap;
        self
    }

    pub fn rules(&self, kind: MetricKind) -> &SegmentationRules {
        match kind {
            MetricKind::HeartRate => &self.heart_rate.rules,
            MetricKind::SpO2 => &self.spo2.rules,
            MetricKind::BloodPressure => &self.blood_pressure.rules,
            MetricKind::Sleep => &self.sleep,
        }
    }

    /// Built-in configuration: resting heart-rate zones, SpO2 saturation bands
    /// and AHA blood pressure categories.
    pub fn default_config() -> ThresholdConfig {
        let band = |name: &str, min: Option<f64>, max: Option<f64>, priority: f64| {
            BandConfig::new(name, min, max).with_priority(priority)
        };

        ThresholdConfig {
            heart_rate: MetricThresholdConfig {
                categories: vec![
                    band("Low", None, Some(60.0), 5.0),
                    band("Normal", Some(60.0), Some(100.0), 10.0),
                    band("Elevated", Some(100.0), Some(120.0), 5.0),
                    band("High", Some(120.0), None, 2.0),
                ],
                deviation_categories: vec![
                    band("Stable", Some(0.0), Some(5.0), 20.0),
                    band("Variable", Some(5.0), Some(15.0), 20.0),
                    band("Erratic", Some(15.0), None, 3.0),
                ],
                rules: RulesConfig {
                    max_gap_minutes: Some(10.0),
                    ..Default::default()
                },
            },
            spo2: MetricThresholdConfig {
                categories: vec![
                    band("Critical", None, Some(90.0), 1.0),
                    band("Low", Some(90.0), Some(95.0), 5.0),
                    band("Normal", Some(95.0), None, 10.0),
                ],
                deviation_categories: vec![band("Unstable", Some(3.0), None, 4.0)],
                rules: RulesConfig {
                    max_gap_minutes: Some(10.0),
                    ..Default::default()
                },
            },
            blood_pressure: BloodPressureThresholdConfig {
                systolic: vec![
                    band("Normal", None, Some(120.0), 10.0),
                    band("Elevated", Some(120.0), Some(130.0), 8.0),
                    band("Hypertension Stage 1", Some(130.0), Some(140.0), 5.0),
                    band("Hypertension Stage 2", Some(140.0), Some(180.0), 3.0),
                    band("Hypertensive Crisis", Some(180.0), None, 1.0),
                ],
                diastolic: vec![
                    band("Normal", None, Some(80.0), 10.0),
                    band("Hypertension Stage 1", Some(80.0), Some(90.0), 5.0),
                    band("Hypertension Stage 2", Some(90.0), Some(120.0), 3.0),
                    band("Hypertensive Crisis", Some(120.0), None, 1.0),
                ],
                deviation_categories: vec![band("Fluctuating", Some(15.0), None, 4.0)],
                rules: RulesConfig {
                    max_gap_minutes: Some(60.0),
                    ..Default::default()
                },
            },
            sleep: SleepThresholdConfig {
                rules: RulesConfig {
                    max_gap_minutes: Some(30.0),
                    ..Default::default()
                },
            },
        }
    }
}
