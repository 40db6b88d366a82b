//! Solver trait and raw trajectory type
//!
//! A numerical solver applies a time-stepping scheme to an
//! [`OdeSystem`](crate::model::OdeSystem) over a [`TimeGrid`]. Solvers are
//! stateless and reusable: the same solver value can integrate any number
//! of systems.

use nalgebra::DVector;

use crate::engine::TimeGrid;
use crate::error::KinetError;
use crate::model::OdeSystem;

/// Raw integration output: one state vector per time point.
///
/// This is the solver-level result; the [`Runner`](crate::engine::Runner)
/// turns it into a named-column [`ResultTable`](crate::engine::ResultTable).
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Output times, length `grid.n_rows()`.
    pub time_points: Vec<f64>,
    /// State at each output time, same length as `time_points`.
    pub states: Vec<DVector<f64>>,
}

impl Trajectory {
    /// Number of stored time points.
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    /// True when no points were stored.
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Final state, if any points were stored.
    pub fn final_state(&self) -> Option<&DVector<f64>> {
        self.states.last()
    }
}

/// A fixed-step explicit time integrator.
///
/// # Contract
///
/// - The trajectory includes the initial state at `grid.start()` and ends
///   exactly at `grid.end()`: `grid.steps() + 1` points in total.
/// - Implementations must check every produced state for NaN/Inf (via
///   [`validate_state`](crate::engine::validate_state)) and surface
///   divergence as [`KinetError::Integration`] — no retries, no salvage.
pub trait Solver: Send + Sync {
    /// Integrate `system` over `grid` starting from `system.initial_state()`.
    fn solve(&self, system: &dyn OdeSystem, grid: &TimeGrid) -> Result<Trajectory, KinetError>;

    /// Display name of the method.
    fn name(&self) -> &str;
}
