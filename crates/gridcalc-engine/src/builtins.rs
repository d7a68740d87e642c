//! Built-in aggregate functions over cell ranges.
//!
//! Conventions:
//! - Spreadsheet-facing names are ALL CAPS (e.g. `SUM`, `AVERAGE`).
//! - Each built-in takes exactly one contiguous range argument (`A1:B5`);
//!   there are no multi-range or nested calls.
//! - If you add a new built-in, update `RANGE_BUILTINS` and its arm in
//!   [`apply`].

use std::sync::OnceLock;

use regex::Regex;

pub struct RangeBuiltin {
    pub name: &'static str,
    #[allow(dead_code)]
    pub description: &'static str,
}

pub const RANGE_BUILTINS: &[RangeBuiltin] = &[
    RangeBuiltin {
        name: "SUM",
        description: "Sum of values in a cell range",
    },
    RangeBuiltin {
        name: "AVERAGE",
        description: "Sum of values divided by the number of cells",
    },
    RangeBuiltin {
        name: "COUNT",
        description: "Number of cells in a range",
    },
    RangeBuiltin {
        name: "MAX",
        description: "Largest numeric value in a cell range",
    },
    RangeBuiltin {
        name: "MIN",
        description: "Smallest numeric value in a cell range",
    },
];

/// Regex that matches a whole built-in call token like `SUM(A1:B5)`.
///
/// Captures:
/// - group 1: function name (e.g. `SUM`)
/// - group 2: start cell ref (e.g. `A1`)
/// - group 3: end cell ref (e.g. `B5`)
pub fn range_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names = RANGE_BUILTINS
            .iter()
            .map(|b| b.name)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r"^({})\(\s*([A-Z]+[0-9]+)\s*:\s*([A-Z]+[0-9]+)\s*\)$",
            names
        ))
        .expect("built-in range regex must compile")
    })
}

/// Apply a built-in aggregate to the resolved member values of its range.
/// Returns None for an unrecognized name.
///
/// COUNT counts every member, numeric or not. MAX/MIN fold with IEEE
/// max/min, which skips NaN members, while SUM/AVERAGE let a NaN member
/// poison the result - matching how non-numeric text coerces elsewhere.
pub fn apply(name: &str, values: &[f64]) -> Option<f64> {
    match name {
        "SUM" => Some(values.iter().sum()),
        "AVERAGE" => Some(values.iter().sum::<f64>() / values.len() as f64),
        "COUNT" => Some(values.len() as f64),
        "MAX" => Some(values.iter().copied().fold(f64::NAN, f64::max)),
        "MIN" => Some(values.iter().copied().fold(f64::NAN, f64::min)),
        _ => None,
    }
}
