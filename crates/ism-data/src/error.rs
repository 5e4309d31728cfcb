//! Error types for generation and output.

use thiserror::Error;

/// Rejected generator configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Density {0} must be in (0, 1]")]
    InvalidDensity(f64),

    #[error("Location mix is invalid: store share {store}, DC share {dc}")]
    InvalidLocationMix { store: f64, dc: f64 },

    #[error("{name} probability {value} must be in [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Cannot draw {reservations} reservations from an empty {pool} pool")]
    EmptyPool {
        reservations: usize,
        pool: &'static str,
    },

    #[error("Range for {name} is empty: {low}..={high}")]
    InvalidRange {
        name: &'static str,
        low: i64,
        high: i64,
    },

    #[error("Vocabulary pool '{0}' is empty")]
    EmptyVocabulary(&'static str),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Date out of range: {0}")]
    DateRange(#[from] time::error::ComponentRange),

    #[error("Timestamp formatting failed: {0}")]
    Format(#[from] time::error::Format),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
