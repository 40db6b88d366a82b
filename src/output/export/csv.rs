//! CSV export for simulation result tables
//!
//! Writes a [`ResultTable`] to CSV (Comma-Separated Values), readable by
//! Excel, Python pandas, MATLAB, and most data analysis tools.
//!
//! # Features
//!
//! - **Simple interface**: one call per table
//! - **Metadata support**: optional `#`-prefixed header with run parameters
//! - **Customizable**: delimiter, precision
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use kinet_rs::output::export_table_csv;
//!
//! let table = runner.run(&mut network, &grid, None)?;
//! export_table_csv(&table, "results/decay.csv", None)?;
//! ```
//!
//! **Output** (`decay.csv`):
//! ```csv
//! time,S1,S2
//! 0.000000,10.000000,0.000000
//! 0.500000,9.512294,0.487706
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use kinet_rs::output::{export_table_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_run("aldea_pkpd", "Runge-Kutta 4", 840.0, 8400);
//! let config = CsvConfig::default().with_metadata(metadata);
//!
//! export_table_csv(&table, "results/case1.csv", Some(&config))?;
//! ```
//!
//! **Output** (`case1.csv`):
//! ```csv
//! # Kinetics Simulation Data
//! # Generated: 2026-08-27T15:30:00Z
//! # Model: aldea_pkpd
//! # Solver: Runge-Kutta 4
//! # Total Time: 840
//! # Time Steps: 8400
//! #
//! time,C,A_beta,VWD,BGTS
//! ...
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::engine::ResultTable;
use crate::error::KinetError;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',        // European CSV
///     precision: 10,         // High precision
///     ..Default::default()
/// };
/// ```
#[derive(Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Create config with high precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields are written to the header.
#[derive(Clone, Default)]
pub struct CsvMetadata {
    /// Model name (e.g. "aldea_pkpd")
    pub model_name: Option<String>,

    /// Solver name (e.g. "Forward Euler", "Runge-Kutta 4")
    pub solver_name: Option<String>,

    /// Total simulation time
    pub total_time: Option<f64>,

    /// Number of integration steps
    pub time_steps: Option<usize>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Create metadata from the core run parameters
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let metadata = CsvMetadata::from_run("aldea_pkpd", "Runge-Kutta 4", 840.0, 8400);
    /// ```
    pub fn from_run(model: &str, solver: &str, total_time: f64, time_steps: usize) -> Self {
        Self {
            model_name: Some(model.to_string()),
            solver_name: Some(solver.to_string()),
            total_time: Some(total_time),
            time_steps: Some(time_steps),
            custom: Vec::new(),
        }
    }

    /// Add a custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments to file
fn write_metadata_header(file: &mut File, metadata: &CsvMetadata) -> Result<(), KinetError> {
    writeln!(file, "# Kinetics Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(file, "# Generated: {}", now.to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(file, "# Model: {}", model)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(file, "# Solver: {}", solver)?;
    }
    if let Some(total_time) = metadata.total_time {
        writeln!(file, "# Total Time: {}", total_time)?;
    }
    if let Some(time_steps) = metadata.time_steps {
        writeln!(file, "# Time Steps: {}", time_steps)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(file, "# {}: {}", key, value)?;
    }

    writeln!(file, "#")?;

    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export a result table to CSV
///
/// Writes one header row with the table's column names followed by one data
/// row per time point. The parent directory is created if missing; an
/// existing file at `output_path` is overwritten.
///
/// # Arguments
///
/// * `table`         - Simulation result table
/// * `output_path`   - Output file path
/// * `configuration` - Optional CSV configuration (uses default if None)
///
/// # Errors
///
/// - [`KinetError::EmptyTable`] when the table has no rows or no columns
/// - [`KinetError::Io`] on file creation or write failure
///
/// # Example
///
/// ```rust,ignore
/// export_table_csv(&table, "results/decay.csv", None)?;
/// ```
pub fn export_table_csv(
    table: &ResultTable,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), KinetError> {
    let output_path = output_path.as_ref();

    // ============================= Validation =============================

    if table.n_rows() == 0 || table.n_cols() == 0 {
        return Err(KinetError::EmptyTable);
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Open File ==============================

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(output_path)?;

    // ============================= Write Metadata =========================

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    // ============================= Write Header ===========================

    let delimiter = configuration.delimiter.to_string();
    writeln!(file, "{}", table.column_names().join(&delimiter))?;

    // ============================= Write Data =============================

    let columns: Vec<&[f64]> = table
        .column_names()
        .iter()
        .map(|name| table.column(name))
        .collect::<Result<_, _>>()?;

    for row in 0..table.n_rows() {
        for (c, column) in columns.iter().enumerate() {
            if c > 0 {
                write!(file, "{}", configuration.delimiter)?;
            }
            write!(
                file,
                "{:.prec$}",
                column[row],
                prec = configuration.precision
            )?;
        }
        writeln!(file)?;
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
