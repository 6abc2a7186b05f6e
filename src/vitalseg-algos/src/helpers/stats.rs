use vitalseg_types::FieldStats;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0_f64
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation around a precomputed mean.
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        0_f64
    } else {
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }
}

pub fn round_float(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Unrounded mean and population deviation.
pub fn moments(values: &[f64]) -> FieldStats {
    let mean = mean(values);
    FieldStats {
        mean,
        std_dev: std_dev(values, mean),
    }
}

pub fn rounded(stats: FieldStats) -> FieldStats {
    FieldStats {
        mean: round_float(stats.mean),
        std_dev: round_float(stats.std_dev),
    }
}

/// Sum / sum-of-squares accumulator for checking variability while a segment grows.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunningStats {
    count: usize,
    sum: f64,
    sum_sq: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Deviation the accumulator would report after pushing `value`.
    pub fn std_dev_with(&self, value: f64) -> f64 {
        Self::population_std(self.count + 1, self.sum + value, self.sum_sq + value * value)
    }

    fn population_std(count: usize, sum: f64, sum_sq: f64) -> f64 {
        if count == 0 {
            return 0_f64;
        }
        let n = count as f64;
        let mean = sum / n;
        // cancellation can leave a tiny negative variance
        (sum_sq / n - mean * mean).max(0.0).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[70.0, 72.0]), 71.0);
    }

    #[test]
    fn std_dev_is_population() {
        // population: sqrt(((2-5)^2 + (4-5)^2 + (4-5)^2 + (4-5)^2 + (5-5)^2 + (5-5)^2 + (7-5)^2 + (9-5)^2) / 8) = 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(std_dev(&values, mean(&values)), 2.0);
    }

    #[test]
    fn std_dev_single_value() {
        assert_eq!(std_dev(&[88.0], 88.0), 0.0);
    }

    #[test]
    fn round_float_basic() {
        assert_eq!(round_float(3.14159), 3.14);
        assert_eq!(round_float(1.999), 2.0);
        assert_eq!(round_float(0.0), 0.0);
    }

    #[test]
    fn moments_then_rounded() {
        let stats = rounded(moments(&[1.0, 2.0, 2.0]));
        assert_eq!(stats.mean, 1.67);
        assert_eq!(stats.std_dev, 0.47);
    }

    #[test]
    fn running_stats_matches_batch() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0];
        let mut running = RunningStats::default();
        values.iter().for_each(|v| running.push(*v));

        let all = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((running.std_dev_with(9.0) - std_dev(&all, mean(&all))).abs() < 1e-9);
        assert!((running.std_dev_with(9.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn running_stats_reset() {
        let mut running = RunningStats::default();
        running.push(10.0);
        running.push(20.0);
        running.reset();
        assert_eq!(running.std_dev_with(5.0), 0.0);

        running.push(4.0);
        assert_eq!(running.std_dev_with(6.0), 1.0);
    }
}
