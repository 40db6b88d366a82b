//! Classical fourth-order Runge-Kutta method
//!
//! The workhorse explicit scheme for non-stiff ODE systems:
//!
//! ```text
//! k1 = f(t_n,        y_n)
//! k2 = f(t_n + dt/2, y_n + dt/2 * k1)
//! k3 = f(t_n + dt/2, y_n + dt/2 * k2)
//! k4 = f(t_n + dt,   y_n + dt   * k3)
//!
//! y_{n+1} = y_n + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
//! ```
//!
//! Fourth-order accurate (global error ~ O(dt⁴)) at 4 right-hand-side
//! evaluations per step. This is the default method used by
//! [`Runner`](crate::engine::Runner).

use tracing::debug;

use crate::engine::{validate_state, Solver, TimeGrid, Trajectory};
use crate::error::KinetError;
use crate::model::OdeSystem;

/// Classical fourth-order Runge-Kutta solver.
///
/// # Example
///
/// ```
/// use kinet_rs::engine::{RK4Solver, Solver, TimeGrid};
/// use kinet_rs::model::load_network;
///
/// let network = load_network("S1 -> S2; k1*S1; k1 = 0.1; S1 = 10").unwrap();
/// let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
///
/// let trajectory = RK4Solver::new().solve(&network, &grid).unwrap();
/// // S1(50) = 10 * exp(-5) ~ 0.0674
/// assert!((trajectory.final_state().unwrap()[0] - 0.0674).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for RK4Solver {
    fn solve(&self, system: &dyn OdeSystem, grid: &TimeGrid) -> Result<Trajectory, KinetError> {
        let dt = grid.dt();
        let half = dt / 2.0;
        debug!(system = system.name(), steps = grid.steps(), dt, "RK4 integration");

        let mut state = system.initial_state();

        let mut time_points = Vec::with_capacity(grid.n_rows());
        let mut states = Vec::with_capacity(grid.n_rows());

        time_points.push(grid.start());
        states.push(state.clone());

        for step in 0..grid.steps() {
            let t = grid.time_at(step);

            let k1 = system.rhs(t, &state);
            let k2 = system.rhs(t + half, &(&state + &k1 * half));
            let k3 = system.rhs(t + half, &(&state + &k2 * half));
            let k4 = system.rhs(t + dt, &(&state + &k3 * dt));

            state += (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0);

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
        "Runge-Kutta 4"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    /// dy/dt = -k*y with known analytical solution.
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

    /// dy/dt = cos(t), analytical solution y(t) = sin(t); exercises the
    /// time-dependent right-hand side path (k2/k3 at the half step).
    struct Cosine;

    impl OdeSystem for Cosine {
        fn dim(&self) -> usize {
            1
        }

        fn initial_state(&self) -> DVector<f64> {
            DVector::zeros(1)
        }

        fn rhs(&self, t: f64, _y: &DVector<f64>) -> DVector<f64> {
            DVector::from_element(1, t.cos())
        }

        fn name(&self) -> &str {
            "Cosine Forcing"
        }
    }

    #[test]
    fn test_rk4_solver_name() {
        assert_eq!(RK4Solver::new().name(), "Runge-Kutta 4");
    }

    #[test]
    fn test_rk4_high_accuracy_on_decay() {
        let system = ExponentialDecay { rate: 0.1, y0: 10.0 };
        let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
        let trajectory = RK4Solver::new().solve(&system, &grid).unwrap();

        let exact = 10.0 * (-0.1_f64 * 50.0).exp();
        let numeric = trajectory.final_state().unwrap()[0];
        // dt = 0.5 with a fourth-order method: error well below 1e-6
        assert!((numeric - exact).abs() < 1e-6);
    }

    #[test]
    fn test_rk4_time_dependent_rhs() {
        let grid = TimeGrid::with_steps(0.0, 3.0, 300).unwrap();
        let trajectory = RK4Solver::new().solve(&Cosine, &grid).unwrap();

        let numeric = trajectory.final_state().unwrap()[0];
        assert!((numeric - 3.0_f64.sin()).abs() < 1e-8);
    }

    #[test]
    fn test_rk4_fourth_order_convergence() {
        let system = ExponentialDecay { rate: 1.0, y0: 1.0 };
        let exact = (-1.0_f64).exp();

        let solve_with = |steps| {
            let grid = TimeGrid::with_steps(0.0, 1.0, steps).unwrap();
            let trajectory = RK4Solver::new().solve(&system, &grid).unwrap();
            (trajectory.final_state().unwrap()[0] - exact).abs()
        };

        let coarse = solve_with(10);
        let fine = solve_with(20);

        // Halving dt must shrink the error by roughly 2^4 = 16
        assert!(fine < coarse / 10.0);
    }

    #[test]
    fn test_rk4_divergence_is_integration_error() {
        let system = ExponentialDecay {
            rate: 1.0e6,
            y0: 1.0,
        };
        let grid = TimeGrid::with_steps(0.0, 100.0, 100).unwrap();
        assert!(matches!(
            RK4Solver::new().solve(&system, &grid),
            Err(KinetError::Integration { .. })
        ));
    }
}
