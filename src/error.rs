//! Error taxonomy for the simulation pipeline
//!
//! Every failure in the pipeline maps to one of the variants below and is
//! propagated to the caller unmodified. There is no retry policy and no
//! partial-result salvage: a failed load or integration yields no table,
//! no plot and no summary.

use thiserror::Error;

/// Errors produced by model loading, simulation and output rendering.
#[derive(Debug, Error)]
pub enum KinetError {
    /// The model text could not be parsed into a reaction network
    /// (malformed syntax, missing rate law, undefined identifier, ...).
    #[error("model load failed: {0}")]
    ModelLoad(String),

    /// The requested time span is empty, inverted or has no steps.
    #[error("invalid time range: {0}")]
    InvalidRange(String),

    /// The integrator produced a non-finite state (divergence, overflow).
    #[error("integration failed at t = {time}: {reason}")]
    Integration { time: f64, reason: String },

    /// A named column was requested that the result table does not carry.
    #[error("unknown column '{0}' in result table")]
    UnknownColumn(String),

    /// A parameter id was used that the loaded model does not define.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// A species id was used that the loaded model does not define.
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    /// The result table has no rows to read from.
    #[error("result table is empty")]
    EmptyTable,

    /// File system failure (unreadable model file, unwritable output path).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The plotting backend failed to compose or write the figure.
    #[error("rendering failed: {0}")]
    Render(String),
}
