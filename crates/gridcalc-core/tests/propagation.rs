//! End-to-end write/propagation behavior of the document model.

use gridcalc_core::{Document, GridcalcError, Value};
use gridcalc_engine::engine::Cell;

fn doc() -> Document {
    Document::new(100, 100)
}

#[test]
fn write_literal_and_read_back() {
    let mut doc = doc();
    let outcome = doc.write("A1", "42").unwrap();
    assert_eq!(outcome.value, Value::Number(42.0));
    assert!(outcome.affected.is_empty());
    assert_eq!(doc.display_value("A1"), "42");
    assert!(doc.get("A1").unwrap().formula.is_none());
}

#[test]
fn write_canonicalizes_lowercase_addresses() {
    let mut doc = doc();
    doc.write("b2", "7").unwrap();
    assert_eq!(doc.display_value("B2"), "7");
    assert_eq!(doc.display_value("b2"), "7");
}

#[test]
fn write_rejects_invalid_address() {
    let mut doc = doc();
    assert!(matches!(
        doc.write("2B", "7"),
        Err(GridcalcError::InvalidAddress(_))
    ));
}

#[test]
fn write_formula_stores_raw_text_and_value() {
    let mut doc = doc();
    doc.write("A1", "3").unwrap();
    let outcome = doc.write("B1", "=A1*2").unwrap();
    assert_eq!(outcome.value, Value::Number(6.0));
    assert_eq!(doc.display_value("B1"), "6");
    assert_eq!(doc.input_string("B1"), "=A1*2");
}

#[test]
fn upstream_edit_recomputes_chain_in_order() {
    let mut doc = doc();
    doc.write("A1", "1").unwrap();
    doc.write("B1", "=A1*2").unwrap();
    doc.write("C1", "=B1+1").unwrap();

    let outcome = doc.write("A1", "5").unwrap();
    let affected: Vec<(&str, &str)> = outcome
        .affected
        .iter()
        .map(|u| (u.address.as_str(), u.display.as_str()))
        .collect();
    assert_eq!(affected, vec![("B1", "10"), ("C1", "11")]);

    // Stored values reflect the recomputation, not just the report.
    assert_eq!(doc.display_value("B1"), "10");
    assert_eq!(doc.display_value("C1"), "11");
}

#[test]
fn propagation_does_not_touch_upstream_cells() {
    let mut doc = doc();
    doc.write("A1", "1").unwrap();
    doc.write("B1", "=A1*2").unwrap();
    doc.write("C1", "=B1+1").unwrap();

    let outcome = doc.write("B1", "=A1*10").unwrap();
    assert!(outcome.affected.iter().all(|u| u.address != "A1"));
    assert_eq!(doc.display_value("A1"), "1");
    assert_eq!(doc.display_value("C1"), "11");
}

#[test]
fn aggregate_formula_recomputes_after_member_edit() {
    let mut doc = doc();
    for (i, n) in [1, 2, 3, 4, 5].iter().enumerate() {
        doc.write(&format!("A{}", i + 1), &n.to_string()).unwrap();
    }
    doc.write("B1", "=SUM(A1:A5)").unwrap();
    assert_eq!(doc.display_value("B1"), "15");

    doc.write("A5", "50").unwrap();
    assert_eq!(doc.display_value("B1"), "60");
}

#[test]
fn cyclic_write_is_rejected_and_atomic() {
    let mut doc = doc();
    doc.write("A1", "1").unwrap();
    doc.write("B1", "=A1*2").unwrap();

    assert!(matches!(
        doc.write("A1", "=B1+1"),
        Err(GridcalcError::CircularReference)
    ));

    // Nothing changed: A1 is still the literal, B1 still holds 2.
    assert_eq!(doc.display_value("A1"), "1");
    assert!(doc.get("A1").unwrap().formula.is_none());
    assert_eq!(doc.display_value("B1"), "2");
}

#[test]
fn self_reference_is_a_cycle() {
    let mut doc = doc();
    assert!(matches!(
        doc.write("A1", "=A1+1"),
        Err(GridcalcError::CircularReference)
    ));
    assert!(doc.get("A1").is_none());
}

#[test]
fn failed_evaluation_does_not_mutate_the_sheet() {
    let mut doc = doc();
    assert!(matches!(
        doc.write("A1", "=NOPE+1"),
        Err(GridcalcError::Eval(_))
    ));
    assert!(doc.get("A1").is_none());
}

#[test]
fn downstream_failure_reports_marker_and_keeps_last_good_value() {
    let mut doc = doc();
    doc.write("A1", "3").unwrap();
    // A downstream formula that can no longer evaluate; its stored value is
    // the last good one.
    doc.sheet.insert(
        "D1".to_string(),
        Cell::with_formula(Value::Number(7.0), "=A1+WAT"),
    );

    let outcome = doc.write("A1", "4").unwrap();
    let d1 = outcome
        .affected
        .iter()
        .find(|u| u.address == "D1")
        .expect("D1 depends on A1 and must be in the affected set");
    assert!(d1.display.starts_with("#Error:"));
    assert_eq!(doc.get("D1").unwrap().value, Value::Number(7.0));
}

#[test]
fn downstream_failure_does_not_stop_propagation() {
    let mut doc = doc();
    doc.write("A1", "3").unwrap();
    doc.sheet.insert(
        "B1".to_string(),
        Cell::with_formula(Value::Number(0.0), "=A1+WAT"),
    );
    doc.write("C1", "=A1*2").unwrap();

    let outcome = doc.write("A1", "10").unwrap();
    let c1 = outcome
        .affected
        .iter()
        .find(|u| u.address == "C1")
        .expect("C1 must still be recomputed after B1 fails");
    assert_eq!(c1.display, "20");
    assert_eq!(doc.display_value("C1"), "20");
}

#[test]
fn writing_empty_text_is_a_logical_delete() {
    let mut doc = doc();
    doc.write("A1", "5").unwrap();
    doc.write("B1", "=A1+1").unwrap();

    let outcome = doc.write("A1", "").unwrap();
    assert_eq!(outcome.value, Value::Empty);
    assert_eq!(doc.display_value("A1"), "");

    // The deleted cell reads as zero downstream.
    assert_eq!(doc.display_value("B1"), "1");
}

#[test]
fn formula_referencing_blank_cell_evaluates_to_its_own_terms() {
    let mut doc = doc();
    let outcome = doc.write("A1", "=Z99+2").unwrap();
    assert_eq!(outcome.value, Value::Number(2.0));
}

#[test]
fn text_literal_then_dependent_goes_nan() {
    let mut doc = doc();
    doc.write("A1", "2").unwrap();
    doc.write("B1", "=A1*2").unwrap();

    doc.write("A1", "words").unwrap();
    assert_eq!(doc.display_value("A1"), "words");
    assert_eq!(doc.display_value("B1"), "#NAN!");
}
