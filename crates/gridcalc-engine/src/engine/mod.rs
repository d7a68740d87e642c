//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Cell`], [`Value`], [`Sheet`] - Data structures for cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`column_labels`], [`expand_range`] - Header labels and range expansion
//! - [`evaluate`] - Formula tokenizing and postfix evaluation
//! - [`extract_dependencies`], [`build_graph`] - Dependency graph construction
//! - [`sort_graph`] - Topological ordering with cycle detection

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod format;

pub use cell::{Cell, Sheet, Value};
pub use cell_ref::{CORNER_LABEL, CellRef, column_labels, expand_range};
pub use cycle::sort_graph;
pub use deps::{DepGraph, build_graph, extract_dependencies};
pub use eval::evaluate;
pub use format::format_number;
