//! Generates the ISM sample data script with the reference configuration.
//!
//! Run with:
//! ```
//! cargo run -p ism-data --bin ism-generate
//! ```

use ism_data::builders::DatasetBuilder;
use ism_data::config::GeneratorConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GeneratorConfig::default();

    tracing::info!("Generating sample data...");
    tracing::info!("- Locations: {}", config.location_count);
    tracing::info!("- SKUs: {}", config.product_count);
    tracing::info!(
        "- SKU-Location density: {:.1}%",
        config.skuloc_density * 100.0
    );
    tracing::info!("- Reserve records: {}", config.reservation_count);

    // Local wall-clock time, falling back to UTC when the offset is unknown
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let now = PrimitiveDateTime::new(now.date(), now.time());
    let mut rng = StdRng::from_entropy();

    let (dataset, summary) = DatasetBuilder::from_config(config)
        .with_metrics(true)
        .build(now, &mut rng)?;

    // Summary output
    tracing::info!("SQL file generated: {}", summary.path.display());
    tracing::info!("Total INSERT statements: {}", summary.total_statements());
    tracing::info!("Records:");
    tracing::info!("  location_master: {}", summary.counts.location_master);
    tracing::info!("  skuloc: {}", summary.counts.skuloc);
    tracing::info!("  rsvehr: {}", summary.counts.rsvehr);

    if let Some(metrics) = &dataset.metrics {
        tracing::info!(
            "  reservations without a matching skuloc row: {}",
            metrics.orphaned_reservation_count
        );
        tracing::debug!("metrics: {}", serde_json::to_string(metrics)?);
    }
    tracing::debug!("summary: {}", serde_json::to_string(&summary)?);

    tracing::info!("To load the generated data:");
    tracing::info!("  1. Review {}", summary.path.display());
    tracing::info!(
        "  2. Run: mysql -u your_user -p your_database < {}",
        summary.path.display()
    );
    tracing::info!("  3. Or paste the SQL into your database client");

    Ok(())
}
