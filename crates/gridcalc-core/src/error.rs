//! Error types for Gridcalc core.

use thiserror::Error;

use gridcalc_engine::error::EvalError;

/// Errors that can occur while editing the document.
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("circular reference detected")]
    CircularReference,

    #[error("invalid cell address: {0}")]
    InvalidAddress(String),

    #[error("evaluation error: {0}")]
    Eval(
        #[from]
        #[source]
        EvalError,
    ),
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
