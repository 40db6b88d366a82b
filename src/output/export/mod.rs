//! Export module for simulation results
//!
//! Each format lives in its own sub-module; adding a new format means
//! adding a file, without modifying existing code.
//!
//! # Available formats
//!
//! | Format  | Module   |
//! |---------|----------|
//! | CSV     | [`csv`]  |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use kinet_rs::output::{export_table_csv, CsvConfig, CsvMetadata};
//!
//! // Full export, default format
//! export_table_csv(&table, "results/run.csv", None)?;
//!
//! // With a metadata header
//! let metadata = CsvMetadata::from_run("aldea_pkpd", "Runge-Kutta 4", 840.0, 8400);
//! let config = CsvConfig::default().with_metadata(metadata);
//! export_table_csv(&table, "results/run.csv", Some(&config))?;
//! ```

pub mod csv;

// Re-export the most commonly used types at the module level so users can
// write `use kinet_rs::output::export::{export_table_csv, CsvConfig}`
// instead of the full sub-module path.
pub use csv::{export_table_csv, CsvConfig, CsvMetadata};
