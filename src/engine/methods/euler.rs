//! Forward Euler method
//!
//! The simplest explicit time-stepping scheme for dy/dt = f(t, y):
//!
//! ```text
//! y_{n+1} = y_n + dt * f(t_n, y_n)
//! ```
//!
//! First-order accurate (global error ~ O(dt)) and conditionally stable:
//! for dy/dt = λy stability requires |1 + λ·dt| ≤ 1. Reaction networks with
//! fast rate constants need a correspondingly small dt or the iteration
//! overflows, which is reported as an `Integration` error.

use tracing::debug;

use crate::engine::{validate_state, Solver, TimeGrid, Trajectory};
use crate::error::KinetError;
use crate::model::OdeSystem;

/// Forward Euler time-stepping solver.
///
/// # Example
///
/// ```
/// use kinet_rs::engine::{EulerSolver, Solver, TimeGrid};
/// use kinet_rs::model::load_network;
///
/// let network = load_network("S1 -> S2; k1*S1; k1 = 0.1; S1 = 10").unwrap();
/// let grid = TimeGrid::with_steps(0.0, 50.0, 5000).unwrap();
///
/// let trajectory = EulerSolver::new().solve(&network, &grid).unwrap();
/// assert_eq!(trajectory.len(), 5001);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    /// Create a new Forward Euler solver.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn solve(&self, system: &dyn OdeSystem, grid: &TimeGrid) -> Result<Trajectory, KinetError> {
        let dt = grid.dt();
        debug!(system = system.name(), steps = grid.steps(), dt, "Euler integration");

        let mut state = system.initial_state();

        // Reserve exact capacity: one extra slot for the initial point
        let mut time_points = Vec::with_capacity(grid.n_rows());
        let mut states = Vec::with_capacity(grid.n_rows());

        time_points.push(grid.start());
        states.push(state.clone());

        for step in 0..grid.steps() {
            let t = grid.time_at(step);

            // y_{n+1} = y_n + dt * f(t_n, y_n)
            let k = system.rhs(t, &state);
            state += k * dt;

            // Time computed from the index, not accumulated, so rounding
            // does not drift over long runs (see TimeGrid::time_at)
            let t_next = grid.time_at(step + 1);
            validate_state(&state, t_next)?;

            time_points.push(t_next);
            states.push(state.clone());
        }

        Ok(Trajectory {
            time_points,
            states,
        })
    }

    fn name(&self) -> &str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    /// dy/dt = -k*y, analytical solution y(t) = y0 * exp(-k*t)
    struct ExponentialDecay {
        rate: f64,
        y0: f64,
    }

    impl OdeSystem for ExponentialDecay {
        fn dim(&self) -> usize {
            1
        }

        fn initial_state(&self) -> DVector<f64> {
            DVector::from_element(1, self.y0)
        }

        fn rhs(&self, _t: f64, y: &DVector<f64>) -> DVector<f64> {
            y * (-self.rate)
        }

        fn name(&self) -> &str {
            "Exponential Decay"
        }
    }

    /// dy/dt = c, analytical solution y(t) = y0 + c*t (Euler is exact here)
    struct ConstantGrowth {
        rate: f64,
    }

    impl OdeSystem for ConstantGrowth {
        fn dim(&self) -> usize {
            1
        }

        fn initial_state(&self) -> DVector<f64> {
            DVector::zeros(1)
        }

        fn rhs(&self, _t: f64, _y: &DVector<f64>) -> DVector<f64> {
            DVector::from_element(1, self.rate)
        }

        fn name(&self) -> &str {
            "Constant Growth"
        }
    }

    #[test]
    fn test_euler_solver_name() {
        assert_eq!(EulerSolver::new().name(), "Forward Euler");
    }

    #[test]
    fn test_trajectory_shape() {
        let system = ConstantGrowth { rate: 1.0 };
        let grid = TimeGrid::with_steps(0.0, 10.0, 100).unwrap();
        let trajectory = EulerSolver::new().solve(&system, &grid).unwrap();

        assert_eq!(trajectory.len(), 101);
        assert_eq!(trajectory.time_points[0], 0.0);
        assert_eq!(*trajectory.time_points.last().unwrap(), 10.0);
    }

    #[test]
    fn test_euler_exact_for_constant_growth() {
        let system = ConstantGrowth { rate: 2.0 };
        let grid = TimeGrid::with_steps(0.0, 5.0, 50).unwrap();
        let trajectory = EulerSolver::new().solve(&system, &grid).unwrap();

        // y(5) = 0 + 2*5 = 10, exact for a constant right-hand side
        let final_state = trajectory.final_state().unwrap();
        assert!((final_state[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_euler_first_order_convergence() {
        let system = ExponentialDecay { rate: 0.5, y0: 1.0 };
        let exact = (-0.5_f64 * 2.0).exp();

        let solve_with = |steps| {
            let grid = TimeGrid::with_steps(0.0, 2.0, steps).unwrap();
            let trajectory = EulerSolver::new().solve(&system, &grid).unwrap();
            (trajectory.final_state().unwrap()[0] - exact).abs()
        };

        let coarse = solve_with(100);
        let fine = solve_with(1000);

        // Halving dt must roughly halve the error; 10x steps ~ 10x smaller error
        assert!(fine < coarse / 5.0);
    }

    #[test]
    fn test_euler_divergence_is_integration_error() {
        // k*dt = 1000 * 0.5 >> 2: the iteration alternates sign and
        // overflows to Inf within a few hundred steps
        let system = ExponentialDecay {
            rate: 1000.0,
            y0: 10.0,
        };
        let grid = TimeGrid::with_steps(0.0, 100.0, 200).unwrap();
        let result = EulerSolver::new().solve(&system, &grid);

        assert!(matches!(result, Err(KinetError::Integration { .. })));
    }
}
