//! Display formatting for computed values.

/// Format a number for display.
///
/// Integer-valued results print without a trailing `.0` so a sum of whole
/// numbers looks like `15`, not `15.0`. Non-finite results render as the
/// usual short markers.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "#NAN!".to_string();
    }
    if n.is_infinite() {
        return "#INF!".to_string();
    }

    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
