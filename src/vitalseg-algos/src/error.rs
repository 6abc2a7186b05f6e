use thiserror::Error;

/// Threshold configuration that cannot be used. Raised once, when the
/// configuration is loaded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{table}: no bands configured")]
    Empty { table: String },
    #[error("{table}: first band `{band}` must have no lower bound")]
    NotOpenBelow { table: String, band: String },
    #[error("{table}: last band `{band}` must have no upper bound")]
    NotOpenAbove { table: String, band: String },
    #[error("{table}: band `{band}` has a non-finite bound")]
    NonFiniteBound { table: String, band: String },
    #[error("{table}: band `{band}` has min >= max")]
    InvertedBand { table: String, band: String },
    #[error("{table}: bands `{previous}` and `{next}` overlap")]
    Overlap {
        table: String,
        previous: String,
        next: String,
    },
    #[error("{table}: values between bands `{previous}` and `{next}` are not covered")]
    Gap {
        table: String,
        previous: String,
        next: String,
    },
    #[error("{table}: `{field}` must be positive and finite, got {value}")]
    NonPositive {
        table: String,
        field: &'static str,
        value: f64,
    },
    #[error("{table}: `{field}` must be non-negative and finite, got {value}")]
    Negative {
        table: String,
        field: &'static str,
        value: f64,
    },
    #[error("{table}: `min_duration_hours` is set without `std_dev_threshold`")]
    IncompleteVariability { table: String },
}
