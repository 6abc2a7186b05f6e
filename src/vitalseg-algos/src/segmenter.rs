use std::collections::BTreeMap;

use uuid::Uuid;
use vitalseg_types::{MetricKind, RawSample, SampleValue, Segment, SegmentStats};

use crate::{
    SegmentationRules, Thresholds,
    helpers::stats::{RunningStats, moments, rounded},
};

/// Groups raw samples into contiguous segments and classifies them.
///
/// The segmenter is a pure function of its inputs: it holds nothing but a
/// borrow of the validated thresholds and can be shared between threads.
#[derive(Clone, Copy, Debug)]
pub struct Segmenter<'a> {
    thresholds: &'a Thresholds,
}

impl<'a> Segmenter<'a> {
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self { thresholds }
    }

    /// Segments the samples of `kind` using the configured rules for that metric.
    /// Samples of any other kind are ignored.
    pub fn segment(&self, user_id: Uuid, kind: MetricKind, samples: &[RawSample]) -> Vec<Segment> {
        self.segment_with(user_id, kind, samples, self.thresholds.rules(kind))
    }

    pub fn segment_with(
        &self,
        user_id: Uuid,
        kind: MetricKind,
        samples: &[RawSample],
        rules: &SegmentationRules,
    ) -> Vec<Segment> {
        let sorted = Self::sorted_of_kind(kind, samples);
        if sorted.len() < samples.len() {
            debug!(
                "Ignoring {} samples that are not {}",
                samples.len() - sorted.len(),
                kind
            );
        }

        Self::partition(&sorted, rules)
            .into_iter()
            .map(|run| self.build_segment(user_id, kind, run))
            .collect()
    }

    /// Continues segmentation after the most recently stored segment.
    ///
    /// Samples before `recent.start` are dropped. When `recent` starts before
    /// the first remaining sample it is kept as the first output and the
    /// samples it already covers are skipped; otherwise it is superseded and
    /// everything is recomputed.
    pub fn resume(
        &self,
        user_id: Uuid,
        kind: MetricKind,
        samples: &[RawSample],
        recent: Option<&Segment>,
    ) -> Vec<Segment> {
        let Some(recent) = recent else {
            return self.segment(user_id, kind, samples);
        };

        if recent.kind != kind {
            warn!(
                "Stored segment is {} but {} was requested, ignoring it",
                recent.kind, kind
            );
            return self.segment(user_id, kind, samples);
        }

        let mut remaining = Self::sorted_of_kind(kind, samples);
        remaining.retain(|s| s.time >= recent.start);

        let Some(first) = remaining.first() else {
            return Vec::new();
        };

        let mut segments = Vec::new();
        if recent.start < first.time {
            debug!(
                "Keeping stored {} segment {} - {}",
                kind, recent.start, recent.end
            );
            segments.push(recent.clone());
            remaining.retain(|s| s.time > recent.end);
        }

        segments.extend(self.segment(user_id, kind, &remaining));
        segments
    }

    /// Segments a mixed list, one entry per metric kind that has samples.
    pub fn segment_all(
        &self,
        user_id: Uuid,
        samples: &[RawSample],
    ) -> BTreeMap<MetricKind, Vec<Segment>> {
        let mut by_kind: BTreeMap<MetricKind, Vec<RawSample>> = BTreeMap::new();
        for sample in samples {
            by_kind.entry(sample.kind()).or_default().push(*sample);
        }

        by_kind
            .into_iter()
            .map(|(kind, samples)| (kind, self.segment(user_id, kind, &samples)))
            .collect()
    }

    fn sorted_of_kind(kind: MetricKind, samples: &[RawSample]) -> Vec<RawSample> {
        let mut sorted = samples
            .iter()
            .filter(|s| s.kind() == kind)
            .copied()
            .collect::<Vec<_>>();
        // stable, equal timestamps keep input order
        sorted.sort_by_key(|s| s.time);
        sorted
    }

    fn partition<'s>(samples: &'s [RawSample], rules: &SegmentationRules) -> Vec<&'s [RawSample]> {
        let mut runs = Vec::new();
        let Some(first) = samples.first() else {
            return runs;
        };

        let mut start = 0;
        let mut running = RunningStats::default();
        running.push(first.value.primary());

        for i in 1..samples.len() {
            let next = &samples[i];
            if Self::should_split(&samples[start..i], next, &running, rules) {
                runs.push(&samples[start..i]);
                start = i;
                running.reset();
            }
            running.push(next.value.primary());
        }

        runs.push(&samples[start..]);
        runs
    }

    fn should_split(
        current: &[RawSample],
        next: &RawSample,
        running: &RunningStats,
        rules: &SegmentationRules,
    ) -> bool {
        let (Some(first), Some(last)) = (current.first(), current.last()) else {
            return false;
        };

        if next.time - last.time > rules.max_gap {
            return true;
        }

        // a run never ends between equal timestamps
        if next.time == last.time {
            return false;
        }

        // compared against the stage the segment is labelled with
        if let (SampleValue::Sleep { stage: a }, SampleValue::Sleep { stage: b }) =
            (first.value, next.value)
        {
            if a != b {
                return true;
            }
        }

        if let Some(max_duration) = rules.max_duration {
            if next.time - first.time > max_duration {
                return true;
            }
        }

        if let Some(variability) = rules.variability {
            if last.time - first.time >= variability.min_duration
                && running.std_dev_with(next.value.primary()) >= variability.std_dev_threshold
            {
                return true;
            }
        }

        false
    }

    fn build_segment(&self, user_id: Uuid, kind: MetricKind, run: &[RawSample]) -> Segment {
        // partition never yields an empty run
        let start = run[0].time;
        let end = run[run.len() - 1].time;

        let (stats, category) = match kind {
            MetricKind::HeartRate | MetricKind::SpO2 => {
                let values = run.iter().map(|s| s.value.primary()).collect::<Vec<_>>();
                let stats = moments(&values);
                let table = match kind {
                    MetricKind::SpO2 => &self.thresholds.spo2,
                    _ => &self.thresholds.heart_rate,
                };
                (SegmentStats::Single(rounded(stats)), table.classify(&stats))
            }
            MetricKind::BloodPressure => {
                let (systolic, diastolic): (Vec<f64>, Vec<f64>) = run
                    .iter()
                    .filter_map(|s| match s.value {
                        SampleValue::BloodPressure {
                            systolic,
                            diastolic,
                        } => Some((systolic, diastolic)),
                        _ => None,
                    })
                    .unzip();
                let systolic = moments(&systolic);
                let diastolic = moments(&diastolic);
                let category = self
                    .thresholds
                    .blood_pressure
                    .classify(&systolic, &diastolic);
                (
                    SegmentStats::BloodPressure {
                        systolic: rounded(systolic),
                        diastolic: rounded(diastolic),
                    },
                    category,
                )
            }
            MetricKind::Sleep => {
                let stage = match run[0].value {
                    SampleValue::Sleep { stage } => stage,
                    _ => Default::default(),
                };
                (SegmentStats::Sleep { stage }, stage.to_string())
            }
        };

        let segment = Segment {
            user_id,
            kind,
            start,
            end,
            points: run.len(),
            stats,
            category,
        };

        if segment.is_unknown() {
            warn!(
                "Unclassified {} segment {} - {} ({})",
                kind, segment.start, segment.end, segment.stats
            );
        } else {
            debug!(
                "Closed {} segment {} - {}: {} points, {}",
                kind, segment.start, segment.end, segment.points, segment.category
            );
        }

        segment
    }
}
