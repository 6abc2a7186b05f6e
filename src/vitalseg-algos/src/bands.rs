use vitalseg_types::BandConfig;

use crate::ConfigError;

/// A validated `[min, max)` range mapped to a category label.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub priority: f64,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value < self.max
    }
}

/// Ordered, non-overlapping bands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    /// Table that must cover the whole real line: open below, open above and
    /// with every neighbour touching.
    pub fn covering(table: &str, config: &[BandConfig]) -> Result<Self, ConfigError> {
        let (first, last) = match (config.first(), config.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ConfigError::Empty {
                    table: table.to_owned(),
                });
            }
        };

        if first.min.is_some() {
            return Err(ConfigError::NotOpenBelow {
                table: table.to_owned(),
                band: first.name.clone(),
            });
        }
        if last.max.is_some() {
            return Err(ConfigError::NotOpenAbove {
                table: table.to_owned(),
                band: last.name.clone(),
            });
        }

        let bands = Self::convert(table, config)?;
        Self::check_neighbours(table, &bands, true)?;
        Ok(Self { bands })
    }

    /// Table that may leave values uncovered, used for deviation categories.
    pub fn partial(table: &str, config: &[BandConfig]) -> Result<Self, ConfigError> {
        let bands = Self::convert(table, config)?;
        Self::check_neighbours(table, &bands, false)?;
        Ok(Self { bands })
    }

    pub fn lookup(&self, value: f64) -> Option<&Band> {
        self.bands.iter().find(|band| band.contains(value))
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    fn convert(table: &str, config: &[BandConfig]) -> Result<Vec<Band>, ConfigError> {
        config
            .iter()
            .map(|band| {
                let min = band.min.unwrap_or(f64::NEG_INFINITY);
                let max = band.max.unwrap_or(f64::INFINITY);

                let explicit_finite = band.min.is_none_or(f64::is_finite)
                    && band.max.is_none_or(f64::is_finite)
                    && band.priority.is_finite();
                if !explicit_finite {
                    return Err(ConfigError::NonFiniteBound {
                        table: table.to_owned(),
                        band: band.name.clone(),
                    });
                }
                if min >= max {
                    return Err(ConfigError::InvertedBand {
                        table: table.to_owned(),
                        band: band.name.clone(),
                    });
                }

                Ok(Band {
                    name: band.name.clone(),
                    min,
                    max,
                    priority: band.priority,
                })
            })
            .collect()
    }

    fn check_neighbours(table: &str, bands: &[Band], covering: bool) -> Result<(), ConfigError> {
        for pair in bands.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.min < previous.max {
                return Err(ConfigError::Overlap {
                    table: table.to_owned(),
                    previous: previous.name.clone(),
                    next: next.name.clone(),
                });
            }
            if covering && next.min > previous.max {
                return Err(ConfigError::Gap {
                    table: table.to_owned(),
                    previous: previous.name.clone(),
                    next: next.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart_rate_bands() -> Vec<BandConfig> {
        vec![
            BandConfig::new("Low", None, Some(60.0)),
            BandConfig::new("Normal", Some(60.0), Some(100.0)),
            BandConfig::new("High", Some(100.0), None),
        ]
    }

    #[test]
    fn lookup_boundaries_go_to_upper_band() {
        let table = BandTable::covering("heart_rate", &heart_rate_bands()).unwrap();
        assert_eq!(table.lookup(59.9).unwrap().name, "Low");
        assert_eq!(table.lookup(60.0).unwrap().name, "Normal");
        assert_eq!(table.lookup(99.99).unwrap().name, "Normal");
        assert_eq!(table.lookup(100.0).unwrap().name, "High");
    }

    #[test]
    fn lookup_extremes_hit_open_bands() {
        let table = BandTable::covering("heart_rate", &heart_rate_bands()).unwrap();
        assert_eq!(table.lookup(-1e9).unwrap().name, "Low");
        assert_eq!(table.lookup(1e9).unwrap().name, "High");
    }

    #[test]
    fn lookup_nan_matches_nothing() {
        let table = BandTable::covering("heart_rate", &heart_rate_bands()).unwrap();
        assert!(table.lookup(f64::NAN).is_none());
    }

    #[test]
    fn empty_table_rejected() {
        assert_eq!(
            BandTable::covering("spo2", &[]),
            Err(ConfigError::Empty {
                table: "spo2".into()
            })
        );
    }

    #[test]
    fn closed_low_end_rejected() {
        let mut bands = heart_rate_bands();
        bands[0].min = Some(0.0);
        assert!(matches!(
            BandTable::covering("heart_rate", &bands),
            Err(ConfigError::NotOpenBelow { .. })
        ));
    }

    #[test]
    fn closed_high_end_rejected() {
        let mut bands = heart_rate_bands();
        bands[2].max = Some(250.0);
        assert!(matches!(
            BandTable::covering("heart_rate", &bands),
            Err(ConfigError::NotOpenAbove { .. })
        ));
    }

    #[test]
    fn overlap_rejected() {
        let mut bands = heart_rate_bands();
        bands[1].min = Some(55.0);
        let err = BandTable::covering("heart_rate", &bands).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Overlap {
                table: "heart_rate".into(),
                previous: "Low".into(),
                next: "Normal".into(),
            }
        );
    }

    #[test]
    fn gap_rejected_only_when_covering() {
        let mut bands = heart_rate_bands();
        bands[1].min = Some(61.0);
        assert!(matches!(
            BandTable::covering("heart_rate", &bands),
            Err(ConfigError::Gap { .. })
        ));

        let deviation = vec![
            BandConfig::new("Stable", Some(0.0), Some(5.0)),
            BandConfig::new("Erratic", Some(15.0), None),
        ];
        let table = BandTable::partial("deviation", &deviation).unwrap();
        assert!(table.lookup(10.0).is_none());
        assert_eq!(table.lookup(20.0).unwrap().name, "Erratic");
    }

    #[test]
    fn inverted_band_rejected() {
        let bands = vec![BandConfig::new("Odd", Some(10.0), Some(10.0))];
        assert!(matches!(
            BandTable::partial("deviation", &bands),
            Err(ConfigError::InvertedBand { .. })
        ));
    }

    #[test]
    fn non_finite_bound_rejected() {
        let bands = vec![
            BandConfig::new("Low", None, Some(f64::NAN)),
            BandConfig::new("High", Some(60.0), None),
        ];
        assert!(matches!(
            BandTable::covering("heart_rate", &bands),
            Err(ConfigError::NonFiniteBound { .. })
        ));
    }

    #[test]
    fn empty_partial_table_is_fine() {
        let table = BandTable::partial("deviation", &[]).unwrap();
        assert!(table.is_empty());
        assert!(table.lookup(3.0).is_none());
    }
}
