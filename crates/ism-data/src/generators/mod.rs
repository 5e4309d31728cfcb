//! Record generators for the three ISM tables.
//!
//! - [`LocationGenerator`]: `location_master` rows with sequential numbers
//! - [`SkulocGenerator`]: sparse SKU-at-location inventory rows
//! - [`ReservationGenerator`]: `rsvehr` holds against generated SKUs and locations
//!
//! Every generator takes its configuration at construction and the random
//! source per call, so a seeded RNG reproduces the same records.

pub mod location;
pub mod reservation;
pub mod skuloc;

pub use location::{GeneratedLocation, LocationGenConfig, LocationGenerator};
pub use reservation::{GeneratedReservation, ReservationGenConfig, ReservationGenerator};
pub use skuloc::{GeneratedSkuloc, SkulocGenConfig, SkulocGenerator};
