//! Fluent builder APIs for sample datasets.
//!
//! The [`DatasetBuilder`] runs location, inventory and reservation
//! generation in order and optionally writes the SQL file.

mod dataset;

pub use dataset::{DatasetBuilder, DatasetMetrics, GeneratedDataset};
