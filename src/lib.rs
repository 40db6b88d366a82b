//! kinet-rs: Reaction-Network Kinetics Simulation
//!
//! A framework for loading biochemical reaction-network models from a
//! plain-text description, integrating their mass-action dynamics over
//! time, and presenting the results as tables, figures and reports.
//!
//! # Architecture
//!
//! kinet-rs is built on two core principles:
//!
//! 1. **Separation of Model and Numerics**
//!    - Reaction networks define the equations (what to solve)
//!    - Numerical solvers provide the methods (how to solve)
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait-based design for easy extension
//!    - Errors surface as typed [`KinetError`](error::KinetError) values
//!    - Stable API (v0.1.0+)
//!
//! # Quick Start
//!
//! ```rust
//! use kinet_rs::engine::{Runner, TimeGrid};
//! use kinet_rs::model::load_network;
//!
//! # fn main() -> Result<(), kinet_rs::error::KinetError> {
//! // 1. Load a model: one reaction, its rate law, a parameter, an initial value
//! let mut network = load_network(
//!     "model decay
//!      S1 -> S2; k1*S1
//!      k1 = 0.1
//!      S1 = 10
//!      end",
//! )?;
//!
//! // 2. Configure the time grid
//! let grid = TimeGrid::with_steps(0.0, 50.0, 100)?;
//!
//! // 3. Run the simulation (Runge-Kutta 4 by default)
//! let table = Runner::default().run(&mut network, &grid, None)?;
//!
//! // 4. Access results by column name
//! let s1_final = table.final_value("S1")?;
//! assert!((s1_final - 10.0 * (-5.0_f64).exp()).abs() < 1e-4);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`model`]: Network description language, rate expressions, the
//!   [`OdeSystem`](model::OdeSystem) seam
//! - [`engine`]: Time grids, solvers, the [`Runner`](engine::Runner),
//!   result tables
//! - [`output`]: Plotting, CSV export, text summaries
//! - [`error`]: The crate-wide error type

// Core modules
pub mod engine;
pub mod error;
pub mod model;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use kinet_rs::prelude::*;
    //! ```
    pub use crate::engine::{EulerSolver,
                            ResultTable,
                            RK4Solver,
                            Runner,
                            Solver,
                            TimeGrid,
                            Trajectory};
    pub use crate::error::KinetError;
    pub use crate::model::{load_network,
                           load_network_file,
                           OdeSystem,
                           ReactionNetwork};
    pub use crate::output::{export_table_csv,
                            plot_timecourse,
                            plot_timecourse_panels,
                            print_summary,
                            CsvConfig,
                            CsvMetadata,
                            EventMarkers,
                            FigureConfig,
                            PanelSpec,
                            PlotConfig};
}
