use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::FieldStats;

/// Per-day rollup across all metrics. Metrics without samples that day stay `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub day: NaiveDate,
    pub points: usize,
    pub heart_rate: Option<FieldStats>,
    pub spo2: Option<FieldStats>,
    pub systolic: Option<FieldStats>,
    pub diastolic: Option<FieldStats>,
}

impl DailySummary {
    pub fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            ..Default::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.points == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_day_is_blank() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let summary = DailySummary::empty(day);
        assert!(summary.is_blank());
        assert_eq!(summary.day, day);
        assert!(summary.heart_rate.is_none());
        assert!(summary.systolic.is_none());
    }
}
