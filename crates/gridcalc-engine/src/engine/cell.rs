//! Cell data structures for the spreadsheet sheet.
//!
//! This module provides the core data types for representing cells:
//! - [`Value`] - The result stored in a cell (empty, text, or number)
//! - [`Cell`] - A cell holding its last computed value and optional formula
//! - [`Sheet`] - Sparse storage for cells, keyed by canonical address

use std::fmt;

use indexmap::IndexMap;

use super::format::format_number;

/// The value stored in a cell: the literal the user entered, or the last
/// successfully evaluated result of the cell's formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Empty,
    Text(String),
    Number(f64),
}

impl Value {
    /// Parse user input into a literal value.
    /// - Empty or whitespace -> Empty
    /// - Valid number -> Number
    /// - Otherwise -> Text
    pub fn from_input(input: &str) -> Value {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Value::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            return Value::Number(n);
        }
        Value::Text(trimmed.to_string())
    }

    /// Numeric view of the value, as arithmetic sees it.
    ///
    /// Empty cells read as 0; text that does not parse as a number reads as
    /// NaN, so it poisons sums rather than silently disappearing.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Empty => 0.0,
            Value::Number(n) => *n,
            Value::Text(t) => t.trim().parse::<f64>().unwrap_or(f64::NAN),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Text(t) => write!(f, "{}", t),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
        }
    }
}

/// A cell in the sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Last successfully computed (or literal) value.
    pub value: Value,
    /// Raw formula text as typed, including the leading `=`.
    /// Absent for plain literals.
    pub formula: Option<String>,
}

impl Cell {
    pub fn literal(value: Value) -> Cell {
        Cell {
            value,
            formula: None,
        }
    }

    pub fn with_formula(value: Value, formula: &str) -> Cell {
        Cell {
            value,
            formula: Some(formula.to_string()),
        }
    }

    /// Text to place in an edit box: the formula if there is one, otherwise
    /// the displayed value.
    pub fn to_input_string(&self) -> String {
        match &self.formula {
            Some(formula) => formula.clone(),
            None => self.value.to_string(),
        }
    }
}

/// Sparse sheet storage, keyed by canonical address string ("A1").
///
/// Insertion order is preserved so that dependency-graph construction and
/// topological sorting are deterministic across runs.
pub type Sheet = IndexMap<String, Cell>;
