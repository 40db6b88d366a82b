//! Numerical integration engine
//!
//! This module turns a loaded model into a time-course result table:
//!
//! 1. **Grid** ([`TimeGrid`]) — WHAT span to integrate (start, end, steps)
//! 2. **Solver** ([`Solver`] trait, [`EulerSolver`], [`RK4Solver`]) — HOW
//!    to integrate it
//! 3. **Runner** ([`Runner`]) — the single-shot pipeline step: resolve the
//!    output selection, reset the model, integrate, materialize a
//!    [`ResultTable`]
//!
//! This separation allows the same model to be integrated with different
//! methods, and the same method to integrate different models — including
//! the hand-written analytical systems the tests use.
//!
//! # Workflow
//!
//! ```text
//! ReactionNetwork ──┐
//!                   ├─► Runner::run ──► ResultTable
//! TimeGrid ─────────┘        │
//!                            └─ Solver (Euler / RK4)
//! ```
//!
//! # Error handling
//!
//! All failures surface as [`KinetError`](crate::error::KinetError) and are
//! never retried: an invalid grid or unknown selection column fails before
//! the solver is invoked, and numerical divergence (NaN/Inf) aborts the
//! integration at the offending step.

mod config;
mod methods;
mod result;
mod runner;
mod traits;

pub use config::TimeGrid;
pub use methods::{EulerSolver, RK4Solver};
pub use result::ResultTable;
pub use runner::Runner;
pub use traits::{Solver, Trajectory};

use nalgebra::DVector;

use crate::error::KinetError;

/// Validate a state vector for numerical issues.
///
/// Checks that the state contains no NaN or Inf values, which indicate
/// numerical instability (step size too large for the system's rates) or
/// overflow.
///
/// # Errors
///
/// [`KinetError::Integration`] with the offending time for diagnostics.
pub(crate) fn validate_state(state: &DVector<f64>, t: f64) -> Result<(), KinetError> {
    if state.iter().any(|x| x.is_nan()) {
        return Err(KinetError::Integration {
            time: t,
            reason: "NaN in state vector; reduce the step size".to_string(),
        });
    }
    if state.iter().any(|x| x.is_infinite()) {
        return Err(KinetError::Integration {
            time: t,
            reason: "overflow (Inf) in state vector; reduce the step size".to_string(),
        });
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
