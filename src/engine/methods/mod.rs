//! Time-stepping methods
//!
//! Concrete implementations of the [`Solver`](crate::engine::Solver) trait.
//!
//! # Available methods
//!
//! - **[`EulerSolver`]**: Forward Euler
//!   - Order: first-order O(dt)
//!   - Cost: 1 right-hand-side evaluation per step
//!   - Use: quick exploratory runs, non-stiff systems with relaxed accuracy
//!
//! - **[`RK4Solver`]**: classical fourth-order Runge-Kutta
//!   - Order: fourth-order O(dt⁴)
//!   - Cost: 4 right-hand-side evaluations per step
//!   - Use: default method for time-course simulations
//!
//! Both are explicit fixed-step methods; stiff systems need a small enough
//! step size or they diverge, which surfaces as an
//! [`Integration`](crate::error::KinetError::Integration) error rather than
//! silent garbage.

mod euler;
mod rk4;

pub use euler::EulerSolver;
pub use rk4::RK4Solver;
