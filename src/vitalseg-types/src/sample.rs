use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Metric family a sample or segment belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricKind {
    HeartRate,
    #[serde(rename = "spo2")]
    #[strum(serialize = "spo2")]
    SpO2,
    BloodPressure,
    Sleep,
}

/// Sleep stage codes as reported by Health Connect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(from = "i64", into = "i64")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SleepStage {
    #[default]
    Unknown,
    Awake,
    Sleeping,
    OutOfBed,
    Light,
    Deep,
    Rem,
    AwakeInBed,
}

impl From<i64> for SleepStage {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Awake,
            2 => Self::Sleeping,
            3 => Self::OutOfBed,
            4 => Self::Light,
            5 => Self::Deep,
            6 => Self::Rem,
            7 => Self::AwakeInBed,
            _ => Self::Unknown,
        }
    }
}

impl From<SleepStage> for i64 {
    fn from(value: SleepStage) -> Self {
        match value {
            SleepStage::Unknown => 0,
            SleepStage::Awake => 1,
            SleepStage::Sleeping => 2,
            SleepStage::OutOfBed => 3,
            SleepStage::Light => 4,
            SleepStage::Deep => 5,
            SleepStage::Rem => 6,
            SleepStage::AwakeInBed => 7,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleValue {
    HeartRate {
        bpm: f64,
    },
    #[serde(rename = "spo2")]
    SpO2 {
        percentage: f64,
    },
    BloodPressure {
        systolic: f64,
        diastolic: f64,
    },
    Sleep {
        stage: SleepStage,
    },
}

/// One timestamped device reading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub time: NaiveDateTime,
    #[serde(flatten)]
    pub value: SampleValue,
}

impl SampleValue {
    pub fn kind(&self) -> MetricKind {
        match self {
            Self::HeartRate { .. } => MetricKind::HeartRate,
            Self::SpO2 { .. } => MetricKind::SpO2,
            Self::BloodPressure { .. } => MetricKind::BloodPressure,
            Self::Sleep { .. } => MetricKind::Sleep,
        }
    }

    /// Value used for variability checks while growing a segment.
    /// Systolic pressure stands in for blood pressure, the stage code for sleep.
    pub fn primary(&self) -> f64 {
        match *self {
            Self::HeartRate { bpm } => bpm,
            Self::SpO2 { percentage } => percentage,
            Self::BloodPressure { systolic, .. } => systolic,
            Self::Sleep { stage } => i64::from(stage) as f64,
        }
    }
}

impl RawSample {
    pub fn heart_rate(time: NaiveDateTime, bpm: f64) -> Self {
        Self {
            time,
            value: SampleValue::HeartRate { bpm },
        }
    }

    pub fn spo2(time: NaiveDateTime, percentage: f64) -> Self {
        Self {
            time,
            value: SampleValue::SpO2 { percentage },
        }
    }

    pub fn blood_pressure(time: NaiveDateTime, systolic: f64, diastolic: f64) -> Self {
        Self {
            time,
            value: SampleValue::BloodPressure {
                systolic,
                diastolic,
            },
        }
    }

    pub fn sleep(time: NaiveDateTime, stage: SleepStage) -> Self {
        Self {
            time,
            value: SampleValue::Sleep { stage },
        }
    }

    pub fn kind(&self) -> MetricKind {
        self.value.kind()
    }
}
