use std::fmt::Write as _;

use shared::{domain::ResultMap, error::RangeError};

/// Terminal rendering of one result set.
///
/// A pending range error hides the results. A map holding the empty key
/// (cleared input) renders as nothing.
pub fn render_text(results: &ResultMap, range_error: Option<&RangeError>) -> String {
    if results.contains_key("") {
        return String::new();
    }
    if let Some(error) = range_error {
        return error.to_string();
    }

    let mut out = String::new();
    for (index, (number, trace)) in results.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{number}");
        if trace.is_empty() {
            out.push_str("  (no digits)\n");
            continue;
        }
        for step in trace.iter() {
            let _ = writeln!(out, "  {} = {}", step.expression, step.result);
        }
        if let Some(root) = trace.root() {
            let _ = writeln!(out, "  root: {root}");
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
