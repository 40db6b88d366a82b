//! Named-column result tables
//!
//! A [`ResultTable`] is the immutable output of one simulation run: one row
//! per output time point, one named column per selected output (`time`,
//! species, observables). It is consumed for reading, export and plotting,
//! then discarded.

use std::collections::HashMap;

use crate::error::KinetError;

/// Column-major table of simulation outputs.
///
/// Row count equals `grid.steps() + 1` (initial point included). Column
/// names match the selection requested at simulation time; looking up any
/// other name is an [`KinetError::UnknownColumn`] error, never silent zeros.
#[derive(Debug, Clone)]
pub struct ResultTable {
    columns: Vec<String>,
    /// data[c][r]: column c, row r. All columns have equal length.
    data: Vec<Vec<f64>>,
    /// Diagnostic key/value pairs (solver name, dt, ...).
    metadata: HashMap<String, String>,
}

impl ResultTable {
    /// Build a table from column names and column-major data.
    ///
    /// # Panics
    ///
    /// Panics when the number of names differs from the number of data
    /// columns or when columns have unequal lengths. Both are internal
    /// construction bugs, not runtime conditions.
    pub(crate) fn new(columns: Vec<String>, data: Vec<Vec<f64>>) -> Self {
        assert_eq!(columns.len(), data.len(), "column name/data mismatch");
        if let Some(first) = data.first() {
            assert!(
                data.iter().all(|c| c.len() == first.len()),
                "ragged result columns"
            );
        }
        Self {
            columns,
            data,
            metadata: HashMap::new(),
        }
    }

    /// Number of rows (output time points).
    pub fn n_rows(&self) -> usize {
        self.data.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in selection order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// One column by name.
    ///
    /// # Errors
    ///
    /// [`KinetError::UnknownColumn`] when the table does not carry `name`.
    pub fn column(&self, name: &str) -> Result<&[f64], KinetError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.data[i].as_slice())
            .ok_or_else(|| KinetError::UnknownColumn(name.to_string()))
    }

    /// The `time` column.
    pub fn time(&self) -> Result<&[f64], KinetError> {
        self.column("time")
    }

    /// Final (last-row) value of one column.
    ///
    /// # Errors
    ///
    /// [`KinetError::UnknownColumn`] for an unknown name,
    /// [`KinetError::EmptyTable`] when the table has no rows.
    pub fn final_value(&self, name: &str) -> Result<f64, KinetError> {
        let column = self.column(name)?;
        column.last().copied().ok_or(KinetError::EmptyTable)
    }

    /// Attach a diagnostic key/value pair.
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Read one diagnostic value.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
