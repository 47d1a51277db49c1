use serde::{Deserialize, Serialize};

pub const DEFAULT_STOP_AT: u64 = 9;
pub const DEFAULT_MAX_TERMS: usize = 10_000;
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1_000_000;

/// Knobs shared by every engine entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Reduction stops once an intermediate sum is at or below this value.
    pub stop_at: u64,
    /// Upper bound on the values a single range expansion may emit.
    pub max_terms: usize,
    /// Upper bound on the summed length of the values a single range
    /// expansion may emit. Terms grow under `*`, so `max_terms` alone does
    /// not bound the work.
    pub max_output_bytes: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            stop_at: DEFAULT_STOP_AT,
            max_terms: DEFAULT_MAX_TERMS,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}
