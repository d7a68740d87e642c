//! Error types for formula evaluation.

use thiserror::Error;

/// Errors raised while resolving or evaluating a formula.
///
/// The evaluator fails on the first invalid token; there is no partial
/// evaluation or best-effort recovery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("invalid cell address: {0}")]
    InvalidAddress(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("invalid function call: {0}")]
    InvalidFunctionCall(String),

    #[error("malformed expression: {0}")]
    MalformedExpression(String),
}
