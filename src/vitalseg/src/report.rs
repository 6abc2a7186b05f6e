use std::fmt::Display;

use vitalseg_algos::helpers::format_hm::FormatHM;
use vitalseg_types::Segment;

/// Plain-text rendering of segments, one per line.
pub struct SegmentTable<'a>(pub &'a [Segment]);

impl Display for SegmentTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in self.0 {
            writeln!(
                f,
                "{}\t{} - {}\t{}\t{} pts\t{}\t{}",
                segment.kind,
                segment.start.format("%Y-%m-%d %H:%M"),
                segment.end.format("%Y-%m-%d %H:%M"),
                segment.duration().format_hm(),
                segment.points,
                segment.stats,
                segment.category,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use uuid::Uuid;
    use vitalseg_types::{FieldStats, MetricKind, SegmentStats};

    #[test]
    fn renders_one_line_per_segment() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let segments = vec![Segment {
            user_id: Uuid::nil(),
            kind: MetricKind::HeartRate,
            start,
            end: start + TimeDelta::minutes(95),
            points: 20,
            stats: SegmentStats::Single(FieldStats {
                mean: 71.0,
                std_dev: 1.0,
            }),
            category: "Normal".into(),
        }];

        assert_eq!(
            SegmentTable(&segments).to_string(),
            "heart_rate\t2025-01-01 08:00 - 2025-01-01 09:35\t01:35\t20 pts\t71.00 ± 1.00\tNormal\n"
        );
    }

    #[test]
    fn empty_table() {
        assert_eq!(SegmentTable(&[]).to_string(), "");
    }
}
