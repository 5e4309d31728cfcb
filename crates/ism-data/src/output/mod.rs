//! SQL file output.
//!
//! The [`SqlWriter`] serializes a generated dataset into a single SQL
//! script: header, per-table sections of INSERT statements, and a
//! trailing `COMMIT;`.

mod writer;

pub use writer::{SqlWriter, TableCounts, WriteSummary, write_dataset};
