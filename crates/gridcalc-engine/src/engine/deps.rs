//! Dependency extraction from formula strings.
//!
//! Parses formula text to find the cell references (e.g., `A1`, the corners
//! of `A1:B5`) a formula mentions, and builds the per-sheet dependency
//! graph from them. Extraction is purely syntactic: it never evaluates
//! anything, so a graph is produced even for formulas that would fail
//! evaluation.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use super::cell::Sheet;

/// Adjacency mapping from a formula cell to the cells it references, in
/// order of first appearance. Cells without a formula never appear as keys;
/// they are always leaves.
pub type DepGraph = IndexMap<String, Vec<String>>;

fn cell_ref_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(r"\b([A-Z]+)([0-9]+)\b").expect("dependency cell reference regex must compile")
    })
}

/// Extract all cell references from a formula as dependencies.
///
/// The text is uppercased first, references come back in order of
/// appearance, and duplicates are kept. A range like `A1:B5` contributes its
/// two corner references.
pub fn extract_dependencies(formula: &str) -> Vec<String> {
    let upper = formula.to_uppercase();
    cell_ref_re()
        .captures_iter(&upper)
        .map(|caps| format!("{}{}", &caps[1], &caps[2]))
        .collect()
}

/// Build the dependency graph for a sheet snapshot.
///
/// One entry per cell with a non-empty stored formula, in sheet insertion
/// order, so independent components sort deterministically.
pub fn build_graph(sheet: &Sheet) -> DepGraph {
    let mut graph = DepGraph::new();
    for (address, cell) in sheet {
        if let Some(formula) = cell.formula.as_deref() {
            if !formula.trim().is_empty() {
                graph.insert(address.clone(), extract_dependencies(formula));
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Cell, Value};

    #[test]
    fn test_extract_dependencies_empty() {
        assert!(extract_dependencies("").is_empty());
        assert!(extract_dependencies("=10 + 20").is_empty());
    }

    #[test]
    fn test_extract_dependencies_multiple_in_order() {
        let deps = extract_dependencies("=B1+C1");
        assert_eq!(deps, vec!["B1", "C1"]);
    }

    #[test]
    fn test_extract_dependencies_lowercase_and_duplicates() {
        assert_eq!(extract_dependencies("=b1+B1"), vec!["B1", "B1"]);
    }

    #[test]
    fn test_extract_dependencies_range_corners() {
        assert_eq!(extract_dependencies("=SUM(A1:B5)"), vec!["A1", "B5"]);
    }

    #[test]
    fn test_build_graph_chain() {
        let mut sheet = Sheet::new();
        let formula_cell = |f: &str| Cell::with_formula(Value::Number(2.0), f);
        sheet.insert("A1".to_string(), formula_cell("=b1+c1"));
        sheet.insert("B1".to_string(), formula_cell("=c1+d1"));
        sheet.insert("D1".to_string(), formula_cell("=e1"));
        sheet.insert("E1".to_string(), formula_cell("=f1"));
        sheet.insert("F1".to_string(), formula_cell("=g1+h1"));
        sheet.insert("G1".to_string(), formula_cell("=i1"));
        sheet.insert("H1".to_string(), formula_cell("=i1"));
        sheet.insert("I1".to_string(), Cell::literal(Value::Number(1.0)));

        let graph = build_graph(&sheet);
        assert_eq!(graph.len(), 7);
        assert_eq!(graph["A1"], vec!["B1", "C1"]);
        assert_eq!(graph["B1"], vec!["C1", "D1"]);
        assert_eq!(graph["D1"], vec!["E1"]);
        assert_eq!(graph["E1"], vec!["F1"]);
        assert_eq!(graph["F1"], vec!["G1", "H1"]);
        assert_eq!(graph["G1"], vec!["I1"]);
        assert_eq!(graph["H1"], vec!["I1"]);
        // I1 has no formula, so it is a leaf, not a key.
        assert!(!graph.contains_key("I1"));
    }

    #[test]
    fn test_build_graph_ignores_literals() {
        let mut sheet = Sheet::new();
        sheet.insert("A1".to_string(), Cell::literal(Value::Number(1.0)));
        assert!(build_graph(&sheet).is_empty());
    }
}
