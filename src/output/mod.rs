//! Output module for simulation results
//!
//! This module provides tools to output simulation results in various forms:
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV data export for external analysis
//! - **Summary**: plain-text run reports
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── timecourse.rs
//! ├── export/             ← Data export
//! │   ├── mod.rs
//! │   └── csv.rs
//! └── summary.rs          ← Text reports
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use kinet_rs::output::{export_table_csv, plot_timecourse, print_summary};
//!
//! let table = runner.run(&mut network, &grid, None)?;
//!
//! plot_timecourse(&table, &["S1", "S2"], "figures/decay.png", None)?;
//! export_table_csv(&table, "results/decay.csv", None)?;
//! print_summary(&table)?;
//! ```
//!
//! # Design Philosophy
//!
//! All three sub-modules consume the same immutable [`ResultTable`] and
//! never touch the model or the solver:
//! - **Visualization**: for human interpretation (plots, figures)
//! - **Export**: for programmatic analysis (CSV)
//! - **Summary**: for terminal feedback at the end of a run
//!
//! [`ResultTable`]: crate::engine::ResultTable

pub mod export;
pub mod summary;
pub mod visualization;

// Re-export commonly used items for convenience
pub use visualization::{
    plot_timecourse,
    plot_timecourse_panels,
    EventMarkers,
    FigureConfig,
    IntoOptionalTitle,
    PanelSpec,
    PlotConfig,
    NO_TITLE,
};

pub use export::{export_table_csv, CsvConfig, CsvMetadata};

pub use summary::{print_summary, write_summary};
