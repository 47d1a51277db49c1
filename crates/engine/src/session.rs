use shared::{domain::ResultMap, error::RangeError};
use tracing::debug;

use crate::{
    aggregate::{aggregate, AggregationKind},
    expand::{expand_range, NumberSequence, RangeStatus},
    options::EngineOptions,
    render::render_text,
    sanitize::{sanitize, Grammar},
};

/// Split a sanitized value into the numbers it names.
pub fn organize(sanitized: &str, options: &EngineOptions) -> NumberSequence {
    match Grammar::detect(sanitized) {
        Grammar::Range => expand_range(sanitized, options),
        Grammar::List => NumberSequence::list(sanitized.split(',').map(str::to_string).collect()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub sanitized: String,
    pub results: ResultMap,
    pub range_error: Option<RangeError>,
    pub truncated: bool,
    pub rendered: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Same as the previous value, or still being typed (`,`/`-` at the end).
    Suppressed { sanitized: String },
    /// Range without an end yet; state left as it was.
    Incomplete { sanitized: String },
    Updated(Update),
}

impl InputOutcome {
    pub fn sanitized(&self) -> &str {
        match self {
            Self::Suppressed { sanitized } | Self::Incomplete { sanitized } => sanitized,
            Self::Updated(update) => &update.sanitized,
        }
    }
}

/// State carried between input-change notifications of one input source.
///
/// Never share a session between independent clients.
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: EngineOptions,
    previous_value: String,
    results: ResultMap,
    range_error: Option<RangeError>,
}

impl Session {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn results(&self) -> &ResultMap {
        &self.results
    }

    pub fn range_error(&self) -> Option<&RangeError> {
        self.range_error.as_ref()
    }

    pub fn previous_value(&self) -> &str {
        &self.previous_value
    }

    pub fn reset(&mut self) {
        self.previous_value.clear();
        self.results = ResultMap::new();
        self.range_error = None;
    }

    /// Handle one change of the raw input text.
    pub fn handle_input(&mut self, raw: &str) -> InputOutcome {
        let sanitized = sanitize(raw);

        if sanitized == self.previous_value || sanitized.ends_with([',', '-']) {
            debug!(%sanitized, "input suppressed");
            return InputOutcome::Suppressed { sanitized };
        }

        self.previous_value = sanitized.clone();
        self.process(sanitized)
    }

    /// Run an already sanitized value through expansion and aggregation,
    /// bypassing the duplicate/trailing-delimiter check.
    pub fn process(&mut self, sanitized: String) -> InputOutcome {
        let sequence = organize(&sanitized, &self.options);
        debug!(
            %sanitized,
            terms = sequence.values.len(),
            status = ?sequence.status,
            "organized input"
        );

        match sequence.status {
            RangeStatus::Incomplete => {}
            RangeStatus::NotRange | RangeStatus::Ascending => self.range_error = None,
            RangeStatus::NotAscending(error) => self.range_error = Some(error),
        }

        let prior = std::mem::take(&mut self.results);
        let aggregation = aggregate(&sequence.values, prior, &self.options);
        self.results = aggregation.results;

        match aggregation.kind {
            AggregationKind::NoOp => return InputOutcome::Incomplete { sanitized },
            AggregationKind::Single => self.range_error = None,
            AggregationKind::Multiple => {}
        }

        InputOutcome::Updated(Update {
            rendered: render_text(&self.results, self.range_error.as_ref()),
            sanitized,
            results: self.results.clone(),
            range_error: self.range_error.clone(),
            truncated: sequence.truncated,
        })
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
