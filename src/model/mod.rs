//! Reaction-network models
//!
//! This module provides the model side of the pipeline:
//!
//! - **Loader** ([`load_network`], [`load_network_file`]): parses an
//!   Antimony-subset model definition into a network handle
//! - **Handle** ([`ReactionNetwork`]): the stateful, exclusively-owned
//!   representation of a loaded model (reset, parameter edits, accessors)
//! - **Rate laws** ([`expr`]): arithmetic expressions bound to species and
//!   parameter slots at load time
//!
//! # Architecture
//!
//! Models are **separate from numerical solvers**:
//! - The model derives the **equations** (dy/dt from stoichiometry and
//!   rate laws)
//! - The solver in [`crate::engine`] provides the **method** to integrate
//!   them
//!
//! The seam between the two is the [`OdeSystem`] trait: any type that can
//! report its dimension, its initial state and its right-hand side can be
//! integrated, which is also what the engine's unit tests exploit with
//! hand-written analytical systems.
//!
//! # Example
//!
//! ```
//! use kinet_rs::model::{load_network, OdeSystem};
//!
//! let network = load_network("S1 -> S2; k1*S1; k1 = 0.1; S1 = 10").unwrap();
//! assert_eq!(network.dim(), 2);
//!
//! let dy = network.rhs(0.0, &network.initial_state());
//! assert!((dy[0] + 1.0).abs() < 1e-12); // dS1/dt = -k1*S1
//! ```

use nalgebra::DVector;

pub mod expr;
pub mod network;
pub mod parser;

pub use network::{Observable, Reaction, ReactionNetwork, Species};
pub use parser::{load_network, load_network_file};

/// An autonomous-or-forced ODE system dy/dt = f(t, y).
///
/// # Responsibility
///
/// Provides the equations; does NOT solve them (that is the job of
/// [`crate::engine::Solver`] implementations).
pub trait OdeSystem: Send + Sync {
    /// State dimension (number of tracked species).
    fn dim(&self) -> usize;

    /// Initial state vector, length [`Self::dim`].
    fn initial_state(&self) -> DVector<f64>;

    /// Right-hand side f(t, y) of dy/dt = f(t, y).
    fn rhs(&self, t: f64, y: &DVector<f64>) -> DVector<f64>;

    /// Name used for display and logging.
    fn name(&self) -> &str;
}
