use std::{
    fs,
    io::{self, Read as _},
    path::Path,
};

use anyhow::Context;
use serde::de::DeserializeOwned;
use vitalseg_algos::Thresholds;
use vitalseg_types::{RawSample, Segment, ThresholdConfig};

/// Reads and validates thresholds. Without a path the built-in tables are used.
pub fn load_thresholds(path: Option<&Path>) -> anyhow::Result<Thresholds> {
    let Some(path) = path else {
        info!("No thresholds file given, using built-in thresholds");
        return Ok(Thresholds::default());
    };

    let config: ThresholdConfig = read_json(path)?;
    let thresholds = Thresholds::try_from(config)
        .with_context(|| format!("Invalid thresholds in `{}`", path.display()))?;

    info!("Loaded thresholds from `{}`", path.display());
    Ok(thresholds)
}

/// Reads a JSON array of samples. `-` reads standard input.
pub fn load_samples(path: &Path) -> anyhow::Result<Vec<RawSample>> {
    let samples: Vec<RawSample> = read_json(path)?;
    debug!("Read {} samples from `{}`", samples.len(), path.display());
    Ok(samples)
}

pub fn load_segment(path: &Path) -> anyhow::Result<Segment> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        text
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read `{}`", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("Failed to parse `{}`", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, path::PathBuf};
    use vitalseg_types::MetricKind;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("vitalseg-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn built_in_thresholds_without_path() {
        assert_eq!(load_thresholds(None).unwrap(), Thresholds::default());
    }

    #[test]
    fn thresholds_round_trip_through_file() {
        let json = serde_json::to_string(&Thresholds::default_config()).unwrap();
        let path = temp_file("thresholds.json", &json);
        assert_eq!(load_thresholds(Some(&path)).unwrap(), Thresholds::default());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn example_thresholds_match_built_in() {
        let example = concat!(env!("CARGO_MANIFEST_DIR"), "/../../thresholds.example.json");
        assert_eq!(
            load_thresholds(Some(Path::new(example))).unwrap(),
            Thresholds::default()
        );
    }

    #[test]
    fn invalid_thresholds_are_reported() {
        let mut config = Thresholds::default_config();
        config.heart_rate.categories.pop();
        let path = temp_file("bad-thresholds.json", &serde_json::to_string(&config).unwrap());

        let err = load_thresholds(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Invalid thresholds in"));
        assert!(format!("{err:#}").contains("must have no upper bound"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn samples_from_file() {
        let path = temp_file(
            "samples.json",
            r#"[
                {"time": "2025-01-01T00:00:00", "kind": "heart_rate", "bpm": 70},
                {"time": "2025-01-01T00:05:00", "kind": "spo2", "percentage": 97.5}
            ]"#,
        );
        let samples = load_samples(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].kind(), MetricKind::SpO2);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_samples(Path::new("/nonexistent/vitalseg.json")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to read `/nonexistent/vitalseg.json`");
    }
}
