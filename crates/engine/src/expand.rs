//! Range expressions (`start-end[op step]`) -> ordered number strings.

use std::sync::LazyLock;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use regex::Regex;
use shared::error::RangeError;
use tracing::{debug, warn};

use crate::options::EngineOptions;

static OPERAND_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\*\+/\^-]").expect("operand split pattern"));
static DIGIT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    Add,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '^' => Some(Self::Power),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }
}

/// How a number sequence relates to range validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeStatus {
    /// Produced from the list grammar.
    NotRange,
    /// Range is missing its start or end.
    Incomplete,
    Ascending,
    NotAscending(RangeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSequence {
    pub values: Vec<String>,
    pub status: RangeStatus,
    /// Set when `max_terms` cut the expansion short.
    pub truncated: bool,
}

impl NumberSequence {
    pub fn list(values: Vec<String>) -> Self {
        Self {
            values,
            status: RangeStatus::NotRange,
            truncated: false,
        }
    }

    fn incomplete() -> Self {
        Self {
            values: Vec::new(),
            status: RangeStatus::Incomplete,
            truncated: false,
        }
    }

    pub fn range_error(&self) -> Option<&RangeError> {
        match &self.status {
            RangeStatus::NotAscending(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpr {
    pub start: BigUint,
    pub end: BigUint,
    /// Zero or absent steps are normalised to one.
    pub step: BigUint,
    pub operator: Operator,
}

impl RangeExpr {
    /// Parse a sanitized range expression. `None` means there is not enough
    /// input yet to form a range.
    pub fn parse(expr: &str) -> Option<Self> {
        let mut operands = OPERAND_SPLIT.split(expr);
        let start = parse_operand(operands.next()?)?;
        let end = parse_operand(operands.next()?)?;
        let step = operands
            .next()
            .and_then(parse_operand)
            .filter(|step| !step.is_zero())
            .unwrap_or_else(BigUint::one);

        // first non-digit run is the range dash, the second one the operator
        let operator = DIGIT_RUNS
            .split(expr)
            .filter(|token| !token.is_empty())
            .nth(1)
            .and_then(|token| token.chars().next())
            .and_then(Operator::from_symbol)
            .unwrap_or_default();

        Some(Self {
            start,
            end,
            step,
            operator,
        })
    }
}

fn parse_operand(token: &str) -> Option<BigUint> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(token.as_bytes(), 10)
}

/// Floats are shown the way they will be reduced: plain decimal digits,
/// never exponent notation.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        format!("{value}")
    }
}

fn to_float(value: &BigUint) -> f64 {
    value.to_f64().unwrap_or(f64::INFINITY)
}

struct Emitter {
    values: Vec<String>,
    bytes: usize,
    max_terms: usize,
    max_output_bytes: usize,
    truncated: bool,
}

impl Emitter {
    fn new(options: &EngineOptions) -> Self {
        Self {
            values: Vec::new(),
            bytes: 0,
            max_terms: options.max_terms,
            max_output_bytes: options.max_output_bytes,
            truncated: false,
        }
    }

    /// Returns `false` once the term limit or the byte budget has been hit.
    fn emit(&mut self, value: String) -> bool {
        if self.values.len() >= self.max_terms
            || self.bytes.saturating_add(value.len()) > self.max_output_bytes
        {
            self.truncated = true;
            return false;
        }
        self.bytes += value.len();
        self.values.push(value);
        true
    }
}

/// Expand a range expression into its number sequence.
///
/// `*` and `/` run once per integer in `start..=end` while scaling a running
/// base; they do not stop when the base passes `end`. `/` and `^` use `f64`
/// arithmetic, `+` and `*` are exact.
pub fn expand_range(expr: &str, options: &EngineOptions) -> NumberSequence {
    let Some(range) = RangeExpr::parse(expr) else {
        debug!(expr, "range expression incomplete");
        return NumberSequence::incomplete();
    };

    if range.end <= range.start {
        let start = range.start.to_string();
        let end = range.end.to_string();
        debug!(%start, %end, "range does not ascend");
        return NumberSequence {
            values: vec![start.clone(), end.clone()],
            status: RangeStatus::NotAscending(RangeError::NotAscending { start, end }),
            truncated: false,
        };
    }

    let mut emitter = Emitter::new(options);
    let terms = &range.end - &range.start + 1u32;

    match range.operator {
        Operator::Add => {
            let mut number = range.start.clone();
            while number <= range.end && emitter.emit(number.to_string()) {
                number += &range.step;
            }
        }
        Operator::Multiply => {
            let mut base = range.start.clone();
            let mut index = BigUint::zero();
            while index < terms && emitter.emit(base.to_string()) {
                base *= &range.step;
                index += 1u32;
            }
        }
        Operator::Divide => {
            let step = to_float(&range.step);
            let mut base = to_float(&range.start);
            let mut index = BigUint::zero();
            while index < terms {
                base /= step;
                if !emitter.emit(format_float(base)) {
                    break;
                }
                index += 1u32;
            }
        }
        Operator::Power => {
            let step = to_float(&range.step);
            let end = to_float(&range.end);
            let mut number = to_float(&range.start);
            while number <= end && emitter.emit(format_float(number.powf(step))) {
                number += 1.0;
            }
        }
    }

    if emitter.truncated {
        warn!(
            expr,
            max_terms = options.max_terms,
            max_output_bytes = options.max_output_bytes,
            emitted_bytes = emitter.bytes,
            "range expansion truncated"
        );
    }

    NumberSequence {
        values: emitter.values,
        status: RangeStatus::Ascending,
        truncated: emitter.truncated,
    }
}

#[cfg(test)]
#[path = "tests/expand_tests.rs"]
mod tests;
