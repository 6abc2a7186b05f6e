use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};
use vitalseg_types::{DailySummary, FieldStats, RawSample, SampleValue};

use crate::helpers::stats::{moments, rounded};

pub const SUMMARY_LOOKBACK_DAYS: i64 = 30;

/// Days to summarize: from the earliest sample, but never more than
/// [`SUMMARY_LOOKBACK_DAYS`] back, up to (excluding) `today`.
pub fn summary_window(earliest: NaiveDate, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let floor = today - TimeDelta::days(SUMMARY_LOOKBACK_DAYS);
    (earliest.max(floor), today)
}

pub struct DailySummaryBuilder;

#[derive(Default)]
struct DayValues {
    points: usize,
    heart_rate: Vec<f64>,
    spo2: Vec<f64>,
    systolic: Vec<f64>,
    diastolic: Vec<f64>,
}

impl DayValues {
    fn push(&mut self, value: &SampleValue) {
        self.points += 1;
        match *value {
            SampleValue::HeartRate { bpm } => self.heart_rate.push(bpm),
            SampleValue::SpO2 { percentage } => self.spo2.push(percentage),
            SampleValue::BloodPressure {
                systolic,
                diastolic,
            } => {
                self.systolic.push(systolic);
                self.diastolic.push(diastolic);
            }
            SampleValue::Sleep { .. } => {}
        }
    }

    fn summarize(self, day: NaiveDate) -> DailySummary {
        let stats = |values: Vec<f64>| -> Option<FieldStats> {
            (!values.is_empty()).then(|| rounded(moments(&values)))
        };

        DailySummary {
            day,
            points: self.points,
            heart_rate: stats(self.heart_rate),
            spo2: stats(self.spo2),
            systolic: stats(self.systolic),
            diastolic: stats(self.diastolic),
        }
    }
}

impl DailySummaryBuilder {
    /// One summary per calendar day in `[from, to)`. Days without samples are
    /// still emitted, with every metric left empty.
    pub fn build(samples: &[RawSample], from: NaiveDate, to: NaiveDate) -> Vec<DailySummary> {
        let mut days: BTreeMap<NaiveDate, DayValues> = BTreeMap::new();
        for sample in samples {
            let day = sample.time.date();
            if day < from || day >= to {
                continue;
            }
            days.entry(day).or_default().push(&sample.value);
        }

        from.iter_days()
            .take_while(|day| *day < to)
            .map(|day| match days.remove(&day) {
                Some(values) => values.summarize(day),
                None => DailySummary::empty(day),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalseg_types::SleepStage;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn at(d: u32, h: u32) -> chrono::NaiveDateTime {
        day(d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn window_is_clamped_to_lookback() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let (from, to) = summary_window(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), today);
        assert_eq!(from, today - TimeDelta::days(30));
        assert_eq!(to, today);

        let recent = NaiveDate::from_ymd_opt(2025, 2, 25).unwrap();
        assert_eq!(summary_window(recent, today).0, recent);
    }

    #[test]
    fn empty_days_are_blank() {
        let summaries = DailySummaryBuilder::build(&[], day(1), day(4));
        assert_eq!(summaries.len(), 3);
        assert!(summaries.iter().all(DailySummary::is_blank));
        assert_eq!(summaries[2].day, day(3));
    }

    #[test]
    fn empty_range() {
        assert!(DailySummaryBuilder::build(&[], day(4), day(4)).is_empty());
    }

    #[test]
    fn per_day_averages() {
        let samples = [
            RawSample::heart_rate(at(1, 8), 60.0),
            RawSample::heart_rate(at(1, 9), 80.0),
            RawSample::spo2(at(1, 9), 97.0),
            RawSample::blood_pressure(at(3, 7), 130.0, 85.0),
            RawSample::sleep(at(3, 2), SleepStage::Deep),
            // outside the range
            RawSample::heart_rate(at(5, 1), 100.0),
        ];
        let summaries = DailySummaryBuilder::build(&samples, day(1), day(4));

        assert_eq!(summaries.len(), 3);

        let first = &summaries[0];
        assert_eq!(first.points, 3);
        assert_eq!(
            first.heart_rate,
            Some(FieldStats {
                mean: 70.0,
                std_dev: 10.0
            })
        );
        assert_eq!(first.spo2.map(|s| s.mean), Some(97.0));
        assert!(first.systolic.is_none());

        assert!(summaries[1].is_blank());

        let third = &summaries[2];
        assert_eq!(third.points, 2);
        assert!(third.heart_rate.is_none());
        assert_eq!(third.systolic.map(|s| s.mean), Some(130.0));
        assert_eq!(third.diastolic.map(|s| s.mean), Some(85.0));
    }
}
