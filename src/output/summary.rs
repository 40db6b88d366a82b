//! Plain-text run summaries
//!
//! Renders a short human-readable report of a finished run: a banner, the
//! run parameters from the table's metadata, and the final value of every
//! column. Used by command-line front-ends after the figures are written.

use std::io::Write;

use crate::engine::ResultTable;
use crate::error::KinetError;

/// Write a run summary to any writer
///
/// Layout:
///
/// ```text
/// ==================================================
/// SIMULATION RESULTS
/// ==================================================
/// Model:  aldea_pkpd
/// Solver: Runge-Kutta 4
/// Steps:  8400
///
/// Final values at t = 840.0:
///   C          =     10.1234
///   A_beta     =      1.4031
/// ==================================================
/// ```
///
/// Metadata lines appear only for keys the table carries. The `time`
/// column is consumed for the "at t = ..." line and skipped in the
/// final-values list.
///
/// # Errors
///
/// - [`KinetError::EmptyTable`] when the table has no rows
/// - [`KinetError::Io`] when the writer fails
pub fn write_summary<W: Write>(writer: &mut W, table: &ResultTable) -> Result<(), KinetError> {
    if table.n_rows() == 0 {
        return Err(KinetError::EmptyTable);
    }

    let banner = "=".repeat(50);

    writeln!(writer, "{}", banner)?;
    writeln!(writer, "SIMULATION RESULTS")?;
    writeln!(writer, "{}", banner)?;

    if let Some(model) = table.metadata("model") {
        writeln!(writer, "Model:  {}", model)?;
    }
    if let Some(solver) = table.metadata("solver") {
        writeln!(writer, "Solver: {}", solver)?;
    }
    if let Some(steps) = table.metadata("steps") {
        writeln!(writer, "Steps:  {}", steps)?;
    }
    writeln!(writer)?;

    // "Final values at t = ..." when a time column exists, plain header otherwise
    match table.time() {
        Ok(time) => {
            let t_end = time.last().copied().unwrap_or(0.0);
            writeln!(writer, "Final values at t = {}:", t_end)?;
        }
        Err(_) => writeln!(writer, "Final values:")?,
    }

    let width = table
        .column_names()
        .iter()
        .filter(|n| n.as_str() != "time")
        .map(|n| n.len())
        .max()
        .unwrap_or(0);

    for name in table.column_names() {
        if name == "time" {
            continue;
        }
        let value = table.final_value(name)?;
        writeln!(writer, "  {:<width$} = {:>12.4}", name, value, width = width)?;
    }

    writeln!(writer, "{}", banner)?;
    Ok(())
}

/// Print a run summary to standard output
///
/// Convenience wrapper over [`write_summary`].
pub fn print_summary(table: &ResultTable) -> Result<(), KinetError> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_summary(&mut lock, table)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Runner, TimeGrid};
    use crate::model::load_network;

    const DECAY: &str = "S1 -> S2; k1*S1; k1 = 0.1; S1 = 10";

    fn render_summary() -> String {
        let mut network = load_network(DECAY).unwrap();
        let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
        let table = Runner::default().run(&mut network, &grid, None).unwrap();

        let mut buffer = Vec::new();
        write_summary(&mut buffer, &table).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_summary_banner_and_headline() {
        let summary = render_summary();
        assert!(summary.contains("SIMULATION RESULTS"));
        assert!(summary.contains(&"=".repeat(50)));
    }

    #[test]
    fn test_summary_metadata_lines() {
        let summary = render_summary();
        assert!(summary.contains("Solver: Runge-Kutta 4"));
        assert!(summary.contains("Steps:  100"));
    }

    #[test]
    fn test_summary_final_values() {
        let summary = render_summary();
        assert!(summary.contains("Final values at t = 50:"));
        // S1(50) = 10 * exp(-5) ~ 0.0674
        assert!(summary.contains("S1"));
        assert!(summary.contains("0.0674"));
        // time is consumed for the headline, not listed as a value
        assert!(!summary.contains("time ="));
    }

    #[test]
    fn test_summary_empty_table_is_error() {
        let table = crate::engine::ResultTable::new(vec![], vec![]);
        let mut buffer = Vec::new();
        assert!(matches!(
            write_summary(&mut buffer, &table),
            Err(KinetError::EmptyTable)
        ));
    }
}
