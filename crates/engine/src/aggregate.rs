use shared::domain::ResultMap;

use crate::{options::EngineOptions, reduce::reduce};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationKind {
    /// Empty sequence; the prior map is handed back untouched.
    NoOp,
    Single,
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub results: ResultMap,
    pub kind: AggregationKind,
}

/// Map every number in `sequence` to its reduction trace.
///
/// A non-empty sequence always produces a fresh map; nothing from `prior`
/// survives. Repeated numbers keep the last trace computed for them.
pub fn aggregate(sequence: &[String], prior: ResultMap, options: &EngineOptions) -> Aggregation {
    let kind = match sequence.len() {
        0 => {
            return Aggregation {
                results: prior,
                kind: AggregationKind::NoOp,
            }
        }
        1 => AggregationKind::Single,
        _ => AggregationKind::Multiple,
    };

    let results = sequence
        .iter()
        .map(|number| (number.clone(), reduce(number, options)))
        .collect();

    Aggregation { results, kind }
}

#[cfg(test)]
#[path = "tests/aggregate_tests.rs"]
mod tests;
