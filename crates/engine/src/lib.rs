//! Digital-root engine: sanitize freeform text, expand range expressions,
//! reduce every number to its digital root and keep the per-session result map.

pub mod aggregate;
pub mod expand;
pub mod options;
pub mod reduce;
pub mod render;
pub mod sanitize;
pub mod session;

use shared::{domain::ResultMap, protocol::ComputeResponse};

pub use aggregate::{aggregate, Aggregation, AggregationKind};
pub use expand::{expand_range, NumberSequence, Operator, RangeExpr, RangeStatus};
pub use options::EngineOptions;
pub use reduce::reduce;
pub use render::render_text;
pub use sanitize::{sanitize, Grammar};
pub use session::{organize, InputOutcome, Session, Update};

/// Result of a one-shot evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub sanitized: String,
    pub results: ResultMap,
    pub range_error: Option<String>,
    pub truncated: bool,
    pub rendered: String,
}

impl From<Evaluation> for ComputeResponse {
    fn from(value: Evaluation) -> Self {
        Self {
            sanitized: value.sanitized,
            results: value.results,
            range_error: value.range_error,
            rendered: value.rendered,
            truncated: value.truncated,
        }
    }
}

impl From<Update> for ComputeResponse {
    fn from(value: Update) -> Self {
        Self {
            sanitized: value.sanitized,
            results: value.results,
            range_error: value.range_error.map(|error| error.to_string()),
            rendered: value.rendered,
            truncated: value.truncated,
        }
    }
}

/// Evaluate one input without any change-notification bookkeeping.
pub fn evaluate(raw: &str, options: &EngineOptions) -> Evaluation {
    let mut session = Session::new(*options);
    match session.process(sanitize(raw)) {
        InputOutcome::Updated(update) => Evaluation {
            sanitized: update.sanitized,
            results: update.results,
            range_error: update.range_error.map(|error| error.to_string()),
            truncated: update.truncated,
            rendered: update.rendered,
        },
        InputOutcome::Suppressed { sanitized } | InputOutcome::Incomplete { sanitized } => {
            Evaluation {
                sanitized,
                results: ResultMap::new(),
                range_error: None,
                truncated: false,
                rendered: String::new(),
            }
        }
    }
}
