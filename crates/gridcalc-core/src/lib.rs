//! gridcalc-core - UI-agnostic document model + update propagation.

pub mod document;
pub mod error;

pub use document::{CellUpdate, Document, WriteOutcome};
pub use error::{GridcalcError, Result};

pub use gridcalc_engine::engine::{Cell, CellRef, Value, column_labels, expand_range};
