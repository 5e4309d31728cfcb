//! SQL script writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::builders::GeneratedDataset;
use crate::error::GenerateError;
use crate::generators::{GeneratedLocation, GeneratedReservation, GeneratedSkuloc};
use crate::sql::{SqlRow, format_timestamp};

const BANNER: &str = "-- ========================================";

/// Number of INSERT statements written per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub location_master: usize,
    pub skuloc: usize,
    pub rsvehr: usize,
}

impl TableCounts {
    pub fn total(&self) -> usize {
        self.location_master + self.skuloc + self.rsvehr
    }
}

/// Outcome of writing a dataset to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub counts: TableCounts,
}

impl WriteSummary {
    pub fn total_statements(&self) -> usize {
        self.counts.total()
    }
}

/// Writes generated datasets as a SQL script.
///
/// The target file is created or truncated and written in a single pass.
/// If a write fails part-way the file is left truncated at that point and
/// the I/O error is returned; nothing is rolled back.
pub struct SqlWriter {
    path: PathBuf,
}

impl SqlWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `dataset` to the configured path.
    pub fn write(&self, dataset: &GeneratedDataset) -> Result<WriteSummary, GenerateError> {
        info!(
            "Writing {} INSERT statements to {}...",
            dataset.total_rows(),
            self.path.display()
        );

        let file = File::create(&self.path)?;
        let mut out = BufWriter::new(file);
        let counts = write_dataset(&mut out, dataset)?;
        out.flush()?;

        info!("Wrote {}", self.path.display());
        Ok(WriteSummary {
            path: self.path.clone(),
            counts,
        })
    }
}

/// Serializes `dataset` into `out`: header, three table sections, footer.
pub fn write_dataset<W: Write>(
    out: &mut W,
    dataset: &GeneratedDataset,
) -> Result<TableCounts, GenerateError> {
    write_header(out, dataset)?;

    let location_master = write_section::<_, GeneratedLocation>(
        out,
        "Location Master Data",
        &dataset.locations,
        false,
    )?;
    let skuloc = write_section::<_, GeneratedSkuloc>(out, "SKULOC Data", &dataset.skulocs, true)?;
    let rsvehr =
        write_section::<_, GeneratedReservation>(out, "RSVEHR Data", &dataset.reservations, true)?;

    writeln!(out)?;
    writeln!(out, "-- End of sample data")?;
    writeln!(out, "COMMIT;")?;

    Ok(TableCounts {
        location_master,
        skuloc,
        rsvehr,
    })
}

fn write_header<W: Write>(
    out: &mut W,
    dataset: &GeneratedDataset,
) -> Result<(), GenerateError> {
    let config = &dataset.config;

    writeln!(out, "-- ISM Search POC Sample Data")?;
    writeln!(
        out,
        "-- Generated on: {}",
        format_timestamp(dataset.generated_at)?
    )?;
    writeln!(out, "-- Configuration:")?;
    writeln!(out, "-- - Locations: {}", config.location_count)?;
    writeln!(out, "-- - SKUs: {}", config.product_count)?;
    writeln!(out, "-- - Reserve records: {}", config.reservation_count)?;
    writeln!(out)?;

    // Child tables before parents
    writeln!(out, "-- Optional: Clean existing data")?;
    writeln!(out, "-- TRUNCATE TABLE {};", GeneratedReservation::TABLE)?;
    writeln!(out, "-- TRUNCATE TABLE {};", GeneratedSkuloc::TABLE)?;
    writeln!(out, "-- TRUNCATE TABLE {};", GeneratedLocation::TABLE)?;
    writeln!(out)?;

    Ok(())
}

fn write_section<W: Write, R: SqlRow>(
    out: &mut W,
    title: &str,
    rows: &[R],
    leading_blank: bool,
) -> Result<usize, GenerateError> {
    if leading_blank {
        writeln!(out)?;
    }
    writeln!(out, "{BANNER}")?;
    writeln!(out, "-- {title}")?;
    writeln!(out, "{BANNER}")?;
    writeln!(out)?;

    for row in rows {
        writeln!(out, "{}", row.to_insert()?)?;
        writeln!(out)?;
    }

    debug!("{}: {} statements", R::TABLE, rows.len());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::DatasetBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::{Date, Month, PrimitiveDateTime, Time};

    fn fixed_now() -> PrimitiveDateTime {
        PrimitiveDateTime::new(
            Date::from_calendar_date(2025, Month::March, 3).unwrap(),
            Time::from_hms(14, 0, 5).unwrap(),
        )
    }

    fn render(dataset: &GeneratedDataset) -> String {
        let mut buf = Vec::new();
        write_dataset(&mut buf, dataset).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_and_footer() {
        let mut rng = StdRng::seed_from_u64(1);
        let dataset = DatasetBuilder::new()
            .with_locations(2)
            .with_products(3)
            .with_reservations(4)
            .build_data(fixed_now(), &mut rng)
            .unwrap();
        let sql = render(&dataset);

        let expected_header = "\
-- ISM Search POC Sample Data
-- Generated on: 2025-03-03 14:00:05
-- Configuration:
-- - Locations: 2
-- - SKUs: 3
-- - Reserve records: 4

-- Optional: Clean existing data
-- TRUNCATE TABLE rsvehr;
-- TRUNCATE TABLE skuloc;
-- TRUNCATE TABLE location_master;

-- ========================================
-- Location Master Data
-- ========================================

INSERT INTO location_master (";
        assert!(sql.starts_with(expected_header), "header was:\n{sql}");
        assert!(sql.ends_with("\n\n-- End of sample data\nCOMMIT;\n"));
    }

    #[test]
    fn test_sections_in_order() {
        let mut rng = StdRng::seed_from_u64(2);
        let dataset = DatasetBuilder::new()
            .with_locations(5)
            .with_products(10)
            .with_density(1.0)
            .with_reservations(2)
            .build_data(fixed_now(), &mut rng)
            .unwrap();
        let sql = render(&dataset);

        let location_at = sql.find("-- Location Master Data").unwrap();
        let skuloc_at = sql.find("-- SKULOC Data").unwrap();
        let rsvehr_at = sql.find("-- RSVEHR Data").unwrap();
        assert!(location_at < skuloc_at && skuloc_at < rsvehr_at);

        assert!(sql[location_at..skuloc_at].contains("INSERT INTO location_master"));
        assert!(!sql[location_at..skuloc_at].contains("INSERT INTO skuloc"));
        assert!(sql[skuloc_at..rsvehr_at].contains("INSERT INTO skuloc"));
        assert!(sql[rsvehr_at..].contains("INSERT INTO rsvehr"));

        // Later sections are set off by an extra blank line
        assert!(sql.contains(&format!("\n\n\n{BANNER}\n-- SKULOC Data\n")));
        assert!(sql.contains(&format!("\n\n\n{BANNER}\n-- RSVEHR Data\n")));
    }

    #[test]
    fn test_counts_match_statements() {
        let mut rng = StdRng::seed_from_u64(3);
        let dataset = DatasetBuilder::new()
            .with_locations(6)
            .with_products(12)
            .with_reservations(9)
            .build_data(fixed_now(), &mut rng)
            .unwrap();

        let mut buf = Vec::new();
        let counts = write_dataset(&mut buf, &dataset).unwrap();
        let sql = String::from_utf8(buf).unwrap();

        assert_eq!(counts.location_master, 6);
        assert_eq!(counts.skuloc, dataset.skulocs.len());
        assert_eq!(counts.rsvehr, 9);
        assert_eq!(sql.matches("INSERT INTO location_master (").count(), 6);
        assert_eq!(
            sql.matches("INSERT INTO skuloc (").count(),
            dataset.skulocs.len()
        );
        assert_eq!(sql.matches("INSERT INTO rsvehr (").count(), 9);
        assert_eq!(counts.total(), dataset.total_rows());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.sql");
        let mut rng = StdRng::seed_from_u64(4);
        let dataset = DatasetBuilder::new()
            .with_locations(2)
            .with_products(2)
            .with_reservations(2)
            .build_data(fixed_now(), &mut rng)
            .unwrap();

        let summary = SqlWriter::new(&path).write(&dataset).unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();

        assert_eq!(summary.path, path);
        assert_eq!(summary.total_statements(), dataset.total_rows());
        assert_eq!(on_disk, render(&dataset));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.sql");
        std::fs::write(&path, "stale contents that are much longer than nothing".repeat(1000))
            .unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let dataset = DatasetBuilder::new()
            .with_locations(0)
            .with_products(0)
            .with_reservations(0)
            .build_data(fixed_now(), &mut rng)
            .unwrap();
        SqlWriter::new(&path).write(&dataset).unwrap();

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(!on_disk.contains("stale"));
        assert!(on_disk.ends_with("COMMIT;\n"));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sample.sql");
        let mut rng = StdRng::seed_from_u64(6);
        let dataset = DatasetBuilder::new()
            .with_locations(1)
            .with_products(1)
            .with_reservations(1)
            .build_data(fixed_now(), &mut rng)
            .unwrap();

        let result = SqlWriter::new(&path).write(&dataset);
        assert!(matches!(result, Err(GenerateError::Io(_))));
    }
}
