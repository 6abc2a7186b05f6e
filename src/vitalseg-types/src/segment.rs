use std::fmt::Display;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MetricKind, SleepStage};

/// Category given to a segment whose value matched no configured band.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentStats {
    Single(FieldStats),
    BloodPressure {
        systolic: FieldStats,
        diastolic: FieldStats,
    },
    Sleep {
        stage: SleepStage,
    },
}

/// A contiguous run of same-kind samples with its aggregate statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub user_id: Uuid,
    pub kind: MetricKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub points: usize,
    pub stats: SegmentStats,
    pub category: String,
}

impl Segment {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn is_unknown(&self) -> bool {
        self.category == UNKNOWN_CATEGORY
    }

    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time <= self.end
    }
}

impl Display for FieldStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} ± {:.2}", self.mean, self.std_dev)
    }
}

impl Display for SegmentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(stats) => write!(f, "{stats}"),
            Self::BloodPressure {
                systolic,
                diastolic,
            } => write!(f, "{systolic} / {diastolic}"),
            Self::Sleep { stage } => write!(f, "{stage}"),
        }
    }
}
