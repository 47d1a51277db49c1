use num_bigint::BigUint;
use shared::domain::{ReductionStep, ReductionTrace};
use tracing::debug;

use crate::options::EngineOptions;

/// Digit-sum `number` until the sum is a single digit or at most
/// `options.stop_at`, recording every step.
///
/// Dots are removed first, so fractional digits are summed with the integer
/// ones. Input without any digits yields an empty trace.
pub fn reduce(number: &str, options: &EngineOptions) -> ReductionTrace {
    let mut trace = ReductionTrace::new();

    let cleaned: String = number.chars().filter(|&c| c != '.').collect();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        debug!(number, "nothing to reduce");
        return trace;
    }
    let Some(mut current) = BigUint::parse_bytes(cleaned.as_bytes(), 10) else {
        return trace;
    };

    let stop_at = BigUint::from(options.stop_at);
    let ten = BigUint::from(10u32);
    loop {
        let digits = current.to_string();
        let sum: BigUint = digits.bytes().map(|b| u32::from(b - b'0')).sum();
        let expression = digits
            .chars()
            .map(String::from)
            .collect::<Vec<_>>()
            .join("+");
        trace.push(ReductionStep::new(expression, sum.to_string()));

        if sum <= stop_at || sum < ten {
            break;
        }
        current = sum;
    }

    trace
}

#[cfg(test)]
#[path = "tests/reduce_tests.rs"]
mod tests;
