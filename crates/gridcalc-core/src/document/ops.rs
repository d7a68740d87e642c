use gridcalc_engine::engine::{Cell, Value, build_graph, evaluate, sort_graph};

use super::Document;
use crate::error::{GridcalcError, Result};

/// A recomputed downstream cell, as the UI should display it.
///
/// `display` carries an error marker (not the stored value) when this
/// particular cell's re-evaluation failed.
#[derive(Clone, Debug, PartialEq)]
pub struct CellUpdate {
    pub address: String,
    pub display: String,
}

/// Result of a committed write: the edited cell's new value plus every
/// downstream cell recomputed because of it, in dependency order.
#[derive(Debug)]
pub struct WriteOutcome {
    pub value: Value,
    pub affected: Vec<CellUpdate>,
}

impl Document {
    /// Write raw input to a cell: evaluate it, reject cycles, commit, and
    /// recompute everything downstream.
    ///
    /// The graph and sort run against a copy of the sheet holding the
    /// speculative cell, so a failed or cyclic write leaves the document
    /// completely unchanged. Writing empty text is the logical delete: the
    /// cell keeps existing with an empty value and no formula.
    pub fn write(&mut self, address: &str, raw: &str) -> Result<WriteOutcome> {
        let address = self.canonical_address(address)?;
        let raw = raw.trim();

        let value = evaluate(&self.sheet, &self.headers, raw)?;

        let mut hypothetical = self.sheet.clone();
        hypothetical.insert(address.clone(), make_cell(raw, &value));

        let graph = build_graph(&hypothetical);
        let order = sort_graph(&graph);
        if order.is_empty() && !graph.is_empty() {
            return Err(GridcalcError::CircularReference);
        }

        self.sheet = hypothetical;
        let affected = self.propagate(&address, &order);

        Ok(WriteOutcome { value, affected })
    }

    /// Re-evaluate the cells after `edited` in dependency order.
    ///
    /// Sequential on purpose: a downstream cell must see already-refreshed
    /// upstream values. A failing cell reports an error marker and keeps
    /// its last-good stored value; propagation continues past it.
    fn propagate(&mut self, edited: &str, order: &[String]) -> Vec<CellUpdate> {
        let Some(position) = order.iter().position(|address| address == edited) else {
            return Vec::new();
        };

        let mut updates = Vec::new();
        for address in &order[position + 1..] {
            let Some(cell) = self.sheet.get(address) else {
                // Referenced-but-blank leaf; nothing to recompute.
                continue;
            };
            let Some(formula) = cell.formula.clone() else {
                updates.push(CellUpdate {
                    address: address.clone(),
                    display: cell.value.to_string(),
                });
                continue;
            };

            match evaluate(&self.sheet, &self.headers, &formula) {
                Ok(value) => {
                    let display = value.to_string();
                    if let Some(cell) = self.sheet.get_mut(address) {
                        cell.value = value;
                    }
                    updates.push(CellUpdate {
                        address: address.clone(),
                        display,
                    });
                }
                Err(err) => {
                    updates.push(CellUpdate {
                        address: address.clone(),
                        display: format!("#Error: {}", err),
                    });
                }
            }
        }
        updates
    }
}

/// Build the cell to store for a committed write. The formula is kept only
/// when the raw text is one; its evaluated value is stored either way.
fn make_cell(raw: &str, value: &Value) -> Cell {
    if raw.starts_with('=') {
        Cell::with_formula(value.clone(), raw)
    } else {
        Cell::literal(value.clone())
    }
}
