use vitalseg_types::{FieldStats, UNKNOWN_CATEGORY};

use crate::{Band, BloodPressureThresholds, MetricThresholds};

/// A deviation band takes over only with a strictly lower priority, or when
/// the value matched nothing.
fn prefer<'a>(value: Option<&'a Band>, deviation: Option<&'a Band>) -> Option<&'a Band> {
    match (value, deviation) {
        (Some(value), Some(deviation)) if deviation.priority < value.priority => Some(deviation),
        (None, deviation) => deviation,
        (value, _) => value,
    }
}

fn label(band: Option<&Band>) -> String {
    band.map_or_else(|| UNKNOWN_CATEGORY.to_owned(), |band| band.name.clone())
}

impl MetricThresholds {
    pub fn classify(&self, stats: &FieldStats) -> String {
        let value = self.categories.lookup(stats.mean);
        let deviation = self.deviation.lookup(stats.std_dev);
        label(prefer(value, deviation))
    }
}

impl BloodPressureThresholds {
    pub fn classify(&self, systolic: &FieldStats, diastolic: &FieldStats) -> String {
        let value = match (
            self.systolic.lookup(systolic.mean),
            self.diastolic.lookup(diastolic.mean),
        ) {
            (Some(sys), Some(dia)) if dia.priority < sys.priority => Some(dia),
            (Some(sys), _) => Some(sys),
            (None, dia) => dia,
        };
        let deviation = self
            .deviation
            .lookup(systolic.std_dev.max(diastolic.std_dev));
        label(prefer(value, deviation))
    }
}
