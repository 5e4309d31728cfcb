//! Fluent builder that runs the generation stages in order.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use rand::Rng;
use serde::Serialize;
use time::PrimitiveDateTime;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::{ConfigError, GenerateError};
use crate::generators::{
    location::{GeneratedLocation, LocationGenConfig, LocationGenerator},
    reservation::{GeneratedReservation, ReservationGenConfig, ReservationGenerator},
    skuloc::{GeneratedSkuloc, SkulocGenConfig, SkulocGenerator},
};
use crate::output::{SqlWriter, WriteSummary};

/// Everything produced by one generation pass.
#[derive(Debug)]
pub struct GeneratedDataset {
    /// Configuration the data was generated from.
    pub config: GeneratorConfig,
    /// Reference time for reservation windows and the file header, whole seconds.
    pub generated_at: PrimitiveDateTime,
    pub locations: Vec<GeneratedLocation>,
    pub sku_ids: Vec<u64>,
    pub skulocs: Vec<GeneratedSkuloc>,
    pub reservations: Vec<GeneratedReservation>,
    /// Metrics from generation (populated if metrics tracking enabled).
    pub metrics: Option<DatasetMetrics>,
}

impl GeneratedDataset {
    /// Location numbers in generation order.
    pub fn location_numbers(&self) -> Vec<u32> {
        self.locations.iter().map(|l| l.loc_number).collect()
    }

    /// Total number of INSERT statements the dataset renders to.
    pub fn total_rows(&self) -> usize {
        self.locations.len() + self.skulocs.len() + self.reservations.len()
    }

    /// Reservations whose SKU/location pair has no `skuloc` row.
    pub fn orphaned_reservations(&self) -> usize {
        let stocked: HashSet<(u64, u32)> = self
            .skulocs
            .iter()
            .map(|row| (row.sku_id, row.location_number))
            .collect();

        self.reservations
            .iter()
            .filter(|r| !stocked.contains(&(r.sku_id, r.location_number)))
            .count()
    }
}

/// Counts and timings from a generation pass.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetMetrics {
    /// Time spent generating records (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent writing the SQL file (milliseconds, 0 if build_data used).
    pub writing_time_ms: u64,
    pub location_count: usize,
    pub skuloc_count: usize,
    pub reservation_count: usize,
    /// Inventory rows with at least one nonzero reserve.
    pub reserved_skuloc_count: usize,
    pub orphaned_reservation_count: usize,
}

/// Builder for a complete sample dataset.
///
/// # Example
///
/// ```rust,ignore
/// let (dataset, summary) = DatasetBuilder::new()
///     .with_locations(5)
///     .with_products(10)
///     .with_density(1.0)
///     .with_reservations(3)
///     .with_output_path("sample.sql")
///     .build(now, &mut rng)?;
/// ```
pub struct DatasetBuilder {
    config: GeneratorConfig,
    location_config: LocationGenConfig,
    skuloc_config: SkulocGenConfig,
    reservation_config: ReservationGenConfig,
    track_metrics: bool,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    /// Creates a builder with the reference configuration.
    pub fn new() -> Self {
        Self::from_config(GeneratorConfig::default())
    }

    pub fn from_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            location_config: LocationGenConfig::default(),
            skuloc_config: SkulocGenConfig::default(),
            reservation_config: ReservationGenConfig::default(),
            track_metrics: false,
        }
    }

    pub fn with_locations(mut self, count: usize) -> Self {
        self.config.location_count = count;
        self
    }

    pub fn with_products(mut self, count: usize) -> Self {
        self.config.product_count = count;
        self
    }

    /// Sets the upper bound on the per-SKU location fraction.
    pub fn with_density(mut self, density: f64) -> Self {
        self.config.skuloc_density = density;
        self
    }

    pub fn with_reservations(mut self, count: usize) -> Self {
        self.config.reservation_count = count;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Sets the location generation configuration.
    pub fn with_location_config(mut self, config: LocationGenConfig) -> Self {
        self.location_config = config;
        self
    }

    /// Sets the inventory generation configuration.
    pub fn with_skuloc_config(mut self, config: SkulocGenConfig) -> Self {
        self.skuloc_config = config;
        self
    }

    /// Sets the reservation generation configuration.
    pub fn with_reservation_config(mut self, config: ReservationGenConfig) -> Self {
        self.reservation_config = config;
        self
    }

    /// Enables metrics tracking.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validates every stage's configuration up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        self.location_config.validate()?;
        self.skuloc_config.validate()?;
        self.reservation_config.validate()?;
        Ok(())
    }

    /// Generates the dataset without writing anything.
    ///
    /// `now` anchors the reservation windows and the header timestamp; its
    /// sub-second part is dropped.
    pub fn build_data(
        &self,
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Result<GeneratedDataset, GenerateError> {
        self.validate()?;
        let now = now.replace_nanosecond(0)?;

        let start_time = if self.track_metrics {
            Some(Instant::now())
        } else {
            None
        };

        // Locations
        info!("Generating {} locations...", self.config.location_count);
        let location_gen = LocationGenerator::with_config(self.location_config.clone());
        let locations = location_gen.generate_batch(self.config.location_count, rng)?;
        let location_numbers: Vec<u32> = locations.iter().map(|l| l.loc_number).collect();

        // Inventory
        info!(
            "Generating skuloc rows for {} SKUs at density {}...",
            self.config.product_count, self.config.skuloc_density
        );
        let skuloc_gen = SkulocGenerator::with_config(self.skuloc_config.clone());
        let sku_ids = skuloc_gen.sku_ids(self.config.product_count);
        let skulocs = skuloc_gen.generate_batch(
            &sku_ids,
            &location_numbers,
            self.config.skuloc_density,
            rng,
        )?;
        debug!(
            "{} skuloc rows across {} SKUs and {} locations",
            skulocs.len(),
            sku_ids.len(),
            location_numbers.len()
        );

        // Reservations
        info!("Generating {} reservations...", self.config.reservation_count);
        let reservation_gen = ReservationGenerator::with_config(self.reservation_config.clone());
        let reservations = reservation_gen.generate_batch(
            self.config.reservation_count,
            &sku_ids,
            &location_numbers,
            now,
            rng,
        )?;

        let mut dataset = GeneratedDataset {
            config: self.config.clone(),
            generated_at: now,
            locations,
            sku_ids,
            skulocs,
            reservations,
            metrics: None,
        };

        // Collect metrics if tracking enabled
        let metrics = start_time.map(|start| DatasetMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            writing_time_ms: 0, // Set by build() once the file is written
            location_count: dataset.locations.len(),
            skuloc_count: dataset.skulocs.len(),
            reservation_count: dataset.reservations.len(),
            reserved_skuloc_count: dataset.skulocs.iter().filter(|r| r.has_reserves()).count(),
            orphaned_reservation_count: dataset.orphaned_reservations(),
        });
        dataset.metrics = metrics;

        Ok(dataset)
    }

    /// Generates the dataset and writes it to the configured output path.
    pub fn build(
        &self,
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Result<(GeneratedDataset, WriteSummary), GenerateError> {
        let mut dataset = self.build_data(now, rng)?;

        let write_start = Instant::now();
        let summary = SqlWriter::new(&self.config.output_path).write(&dataset)?;

        if let Some(metrics) = dataset.metrics.as_mut() {
            metrics.writing_time_ms = write_start.elapsed().as_millis() as u64;
        }

        Ok((dataset, summary))
    }
}
