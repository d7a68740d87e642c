//! Cell reference parsing, header labels, and range expansion.
//!
//! Provides bidirectional conversion between spreadsheet-style cell
//! references (e.g., "A1", "B2", "AA100") and zero-indexed column/row
//! coordinates, plus the two address-level operations built on it: header
//! label generation and rectangular range expansion.
//!
//! Column letters are bijective base-26: A..Z, then AA, AB, .. (there is no
//! zero digit, which is what keeps AA sorting after Z).

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::EvalError;

/// Label reserved for the row-header column, emitted before "A" by
/// [`column_labels`].
pub const CORNER_LABEL: &str = "◢";

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("A1 reference regex must compile")
    })
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "B2",
    /// "AA10"). Case-insensitive. Returns None if the input is invalid,
    /// including row 0 and column overflow.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut col_acc = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;

        let row = numbers.parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(col, row))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z,
    /// 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

/// Generate `count + 1` header labels: the reserved corner marker for the
/// row-header column, then "A", "B", .. in bijective base-26 order.
pub fn column_labels(count: usize) -> Vec<String> {
    let mut labels = Vec::with_capacity(count + 1);
    labels.push(CORNER_LABEL.to_string());
    for col in 0..count {
        labels.push(CellRef::col_to_letters(col));
    }
    labels
}

/// Expand a rectangular range between two corner addresses into the full
/// list of member addresses, row-major.
///
/// Corner order does not matter: rows and column positions are min/max
/// normalized independently, so `expand_range(h, "C3", "A1")` equals
/// `expand_range(h, "A1", "C3")`. Columns are resolved through `headers` so
/// a range cannot reach past the configured sheet width.
pub fn expand_range(
    headers: &[String],
    start: &str,
    end: &str,
) -> Result<Vec<String>, EvalError> {
    let start_ref = CellRef::from_str(start)
        .ok_or_else(|| EvalError::InvalidAddress(start.to_string()))?;
    let end_ref =
        CellRef::from_str(end).ok_or_else(|| EvalError::InvalidAddress(end.to_string()))?;

    let col_position = |col: usize| -> Result<usize, EvalError> {
        let label = CellRef::col_to_letters(col);
        headers
            .iter()
            .position(|h| *h == label)
            .ok_or(EvalError::UnknownColumn(label))
    };
    let start_col = col_position(start_ref.col)?;
    let end_col = col_position(end_ref.col)?;

    let row_min = start_ref.row.min(end_ref.row);
    let row_max = start_ref.row.max(end_ref.row);
    let col_min = start_col.min(end_col);
    let col_max = start_col.max(end_col);

    let mut cells = Vec::with_capacity((row_max - row_min + 1) * (col_max - col_min + 1));
    for row in row_min..=row_max {
        for col in col_min..=col_max {
            cells.push(format!("{}{}", headers[col], row + 1));
        }
    }
    Ok(cells)
}
