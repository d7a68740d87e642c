use gridcalc_engine::engine::{Cell, CellRef, Sheet, column_labels};

use crate::error::{GridcalcError, Result};

/// UI-agnostic document state for the spreadsheet.
///
/// Owns the sheet exclusively; callers must serialize writes. The
/// dependency graph and update order are derived per edit, never stored.
pub struct Document {
    /// Sparse cell storage keyed by canonical address ("A1").
    pub sheet: Sheet,
    /// Header labels: the corner marker, then one label per column.
    pub headers: Vec<String>,
    /// Grid dimensions as (rows, columns).
    pub size: (usize, usize),
}

impl Document {
    /// Create an empty document.
    ///
    /// This constructor is side-effect free: it builds the header labels
    /// and nothing else.
    pub fn new(rows: usize, columns: usize) -> Self {
        Document {
            sheet: Sheet::new(),
            headers: column_labels(columns),
            size: (rows, columns),
        }
    }

    /// Canonicalize a user-supplied address ("b12" -> "B12").
    pub(crate) fn canonical_address(&self, address: &str) -> Result<String> {
        let cell_ref = CellRef::from_str(address)
            .ok_or_else(|| GridcalcError::InvalidAddress(address.to_string()))?;
        Ok(cell_ref.to_string())
    }

    pub fn get(&self, address: &str) -> Option<&Cell> {
        let canonical = self.canonical_address(address).ok()?;
        self.sheet.get(&canonical)
    }

    /// Value shown in the cell itself.
    pub fn display_value(&self, address: &str) -> String {
        self.get(address)
            .map(|cell| cell.value.to_string())
            .unwrap_or_default()
    }

    /// Text to show in the edit box: the formula if the cell has one,
    /// otherwise its value.
    pub fn input_string(&self, address: &str) -> String {
        self.get(address)
            .map(Cell::to_input_string)
            .unwrap_or_default()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(100, 100)
    }
}
