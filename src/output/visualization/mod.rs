//! Visualization module for simulation results
//!
//! Plots result tables with the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`, `FigureConfig`,
//!   `PanelSpec`, `EventMarkers`)
//! - **timecourse**: Temporal plots (column values vs time)
//!
//! # Quick Start
//!
//! ## Overlay plot (several columns, one pair of axes)
//!
//! ```rust,ignore
//! use kinet_rs::output::{plot_timecourse, PlotConfig};
//!
//! let table = runner.run(&mut network, &grid, None)?;
//!
//! // Plot with default config
//! plot_timecourse(&table, &["S1", "S2"], "decay.png", None)?;
//!
//! // Or with custom config
//! let config = PlotConfig::timecourse("First-order decay");
//! plot_timecourse(&table, &["S1", "S2"], "decay.png", Some(&config))?;
//! ```
//!
//! ## Stacked panels (one column per panel, independent y-ranges)
//!
//! ```rust,ignore
//! use kinet_rs::output::{plot_timecourse_panels, PanelSpec};
//!
//! let panels = vec![
//!     PanelSpec::new("C", "PK [mcg/ml]").y_range(0.0, 150.0),
//!     PanelSpec::new("BGTS", "Severity score").y_range(0.0, 30.0),
//! ];
//! plot_timecourse_panels(&table, &panels, "figures/case1.png", None)?;
//! ```
//!
//! # When to Use Which Function
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Curves of comparable magnitude | [`plot_timecourse`] |
//! | Mixed magnitudes, per-panel ranges | [`plot_timecourse_panels`] |
//! | Dose/event annotations | [`plot_timecourse_panels`] with [`EventMarkers`] |

pub mod config;
pub mod timecourse;

pub use config::{EventMarkers, FigureConfig, IntoOptionalTitle, PanelSpec, PlotConfig, NO_TITLE};

pub use timecourse::{plot_timecourse, plot_timecourse_panels};
