//! Sample data generation for the ISM search POC.
//!
//! This crate fabricates `location_master`, `skuloc` and `rsvehr` rows and
//! writes them as a SQL script of INSERT statements. All randomness flows
//! through a caller-supplied RNG, so a seeded RNG plus a fixed "now"
//! reproduces the same script byte for byte.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ism_data::prelude::*;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let (dataset, summary) = DatasetBuilder::from_config(GeneratorConfig::default())
//!     .with_metrics(true)
//!     .build(now, &mut rng)?;
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod generators;
pub mod models;
pub mod output;
pub mod sql;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{DatasetBuilder, DatasetMetrics, GeneratedDataset};
    pub use crate::config::{City, GeneratorConfig, LocationMix, Vocabulary};
    pub use crate::error::{ConfigError, GenerateError};
    pub use crate::generators::{
        GeneratedLocation, GeneratedReservation, GeneratedSkuloc, LocationGenConfig,
        LocationGenerator, ReservationGenConfig, ReservationGenerator, SkulocGenConfig,
        SkulocGenerator,
    };
    pub use crate::models::{
        Channel, LocationType, ReservationProgram, ReservationStatus, ReservationType,
    };
    pub use crate::output::{SqlWriter, TableCounts, WriteSummary, write_dataset};
    pub use crate::sql::SqlRow;
}
