//! Simulation runner
//!
//! The single-shot pipeline step between a loaded model and a result
//! table. The runner owns no state across runs; every call is:
//!
//! 1. Resolve the output selection against the model (fail fast on an
//!    unknown name, before any integration work)
//! 2. Reset the model to its initial state (repeatable results from the
//!    same handle)
//! 3. Integrate over the grid with the configured solver
//! 4. Materialize the selected columns into a [`ResultTable`] and store
//!    the final state back on the handle

use tracing::info;

use crate::engine::{ResultTable, RK4Solver, Solver, TimeGrid};
use crate::error::KinetError;
use crate::model::{OdeSystem, ReactionNetwork};

/// Where one selected column reads its values from.
enum ColumnSource {
    Time,
    Species(usize),
    Observable(usize),
}

/// Executes simulations: reset, integrate, select, tabulate.
///
/// # Example
///
/// ```
/// use kinet_rs::engine::{Runner, TimeGrid};
/// use kinet_rs::model::load_network;
///
/// let mut network = load_network("S1 -> S2; k1*S1; k1 = 0.1; S1 = 10").unwrap();
/// let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
///
/// let table = Runner::default().run(&mut network, &grid, None).unwrap();
/// assert_eq!(table.n_rows(), 101);
/// assert_eq!(table.column_names(), &["time", "S1", "S2"]);
/// ```
pub struct Runner {
    solver: Box<dyn Solver>,
}

impl Runner {
    /// Create a runner with an explicit solver.
    pub fn new(solver: Box<dyn Solver>) -> Self {
        Self { solver }
    }

    /// Name of the configured solver.
    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Run one simulation.
    ///
    /// `selection` names the output columns; `None` selects `time` plus
    /// every species in declaration order. Species and observable ids are
    /// both valid selections; `time` is always valid.
    ///
    /// The model is reset to its initial state before integrating, so
    /// repeated calls with the same handle and parameters reproduce the
    /// same table. After the run the handle's current concentrations hold
    /// the final state.
    ///
    /// # Errors
    ///
    /// - [`KinetError::UnknownColumn`] when a selected name is neither
    ///   `time`, a species nor an observable (raised before integration)
    /// - [`KinetError::Integration`] when the solver diverges
    pub fn run(
        &self,
        network: &mut ReactionNetwork,
        grid: &TimeGrid,
        selection: Option<&[&str]>,
    ) -> Result<ResultTable, KinetError> {
        // Step 1: resolve the selection before any solver work
        let names: Vec<String> = match selection {
            Some(names) => names.iter().map(|n| n.to_string()).collect(),
            None => {
                let mut names = vec!["time".to_string()];
                names.extend(network.species_ids().iter().map(|s| s.to_string()));
                names
            }
        };

        let sources: Vec<ColumnSource> = names
            .iter()
            .map(|name| {
                if name == "time" {
                    Ok(ColumnSource::Time)
                } else if let Some(slot) = network.species_slot(name) {
                    Ok(ColumnSource::Species(slot))
                } else if let Some(slot) = network.observable_slot(name) {
                    Ok(ColumnSource::Observable(slot))
                } else {
                    Err(KinetError::UnknownColumn(name.clone()))
                }
            })
            .collect::<Result<_, _>>()?;

        // Step 2: reset, so the run starts from the initial state no
        // matter what a previous run left on the handle
        network.reset();

        // Step 3: integrate
        info!(
            model = OdeSystem::name(network),
            solver = self.solver.name(),
            start = grid.start(),
            end = grid.end(),
            steps = grid.steps(),
            "running simulation"
        );
        let trajectory = self.solver.solve(network, grid)?;

        // Step 4: materialize the selected columns, column-major
        let n_rows = trajectory.len();
        let mut data: Vec<Vec<f64>> = Vec::with_capacity(sources.len());
        for source in &sources {
            let column = match source {
                ColumnSource::Time => trajectory.time_points.clone(),
                ColumnSource::Species(slot) => {
                    trajectory.states.iter().map(|y| y[*slot]).collect()
                }
                ColumnSource::Observable(slot) => trajectory
                    .time_points
                    .iter()
                    .zip(trajectory.states.iter())
                    .map(|(t, y)| network.eval_observable(*slot, *t, y))
                    .collect(),
            };
            data.push(column);
        }

        // The handle now reports the final concentrations, mirroring the
        // reset-before-run convention above
        if let Some(final_state) = trajectory.final_state() {
            network.set_state(final_state.clone());
        }

        let mut table = ResultTable::new(names, data);
        table.add_metadata("model", OdeSystem::name(network));
        table.add_metadata("solver", self.solver.name());
        table.add_metadata("steps", &grid.steps().to_string());
        table.add_metadata("dt", &grid.dt().to_string());

        info!(rows = n_rows, columns = table.n_cols(), "simulation completed");
        Ok(table)
    }
}

impl Default for Runner {
    /// RK4 is the default method.
    fn default() -> Self {
        Self::new(Box::new(RK4Solver::new()))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EulerSolver;
    use crate::model::load_network;

    const DECAY: &str = "S1 -> S2; k1*S1; k1 = 0.1; S1 = 10";

    #[test]
    fn test_default_selection() {
        let mut network = load_network(DECAY).unwrap();
        let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
        let table = Runner::default().run(&mut network, &grid, None).unwrap();

        assert_eq!(table.column_names(), &["time", "S1", "S2"]);
        assert_eq!(table.n_rows(), 101);
    }

    #[test]
    fn test_explicit_selection_order() {
        let mut network = load_network(DECAY).unwrap();
        let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
        let table = Runner::default()
            .run(&mut network, &grid, Some(&["time", "S2"]))
            .unwrap();

        assert_eq!(table.column_names(), &["time", "S2"]);
        assert!(table.column("S1").is_err());
    }

    #[test]
    fn test_unknown_selection_fails_before_integration() {
        let mut network = load_network(DECAY).unwrap();
        let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
        let err = Runner::default()
            .run(&mut network, &grid, Some(&["time", "S3"]))
            .unwrap_err();

        match err {
            KinetError::UnknownColumn(name) => assert_eq!(name, "S3"),
            other => panic!("expected UnknownColumn, got {:?}", other),
        }
        // The handle was not touched: selection resolution precedes reset
        // and integration, so the state still holds the initials
        assert!((network.concentration("S1").unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_handle_holds_final_state_after_run() {
        let mut network = load_network(DECAY).unwrap();
        let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
        let table = Runner::default().run(&mut network, &grid, None).unwrap();

        let final_s1 = table.final_value("S1").unwrap();
        assert!((network.concentration("S1").unwrap() - final_s1).abs() < 1e-12);
    }

    #[test]
    fn test_metadata_is_attached() {
        let mut network = load_network(DECAY).unwrap();
        let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();

        let table = Runner::new(Box::new(EulerSolver::new()))
            .run(&mut network, &grid, None)
            .unwrap();
        assert_eq!(table.metadata("solver"), Some("Forward Euler"));
        assert_eq!(table.metadata("steps"), Some("100"));
    }
}
