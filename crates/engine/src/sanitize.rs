//! Freeform text -> list or range expression.
//!
//! Each grammar has an ordered rule chain. Later rules assume the shape
//! left behind by earlier ones, so the order below must not change.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `1,2.5,30`
    List,
    /// `start-end[op step]`
    Range,
}

static RANGE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+-").expect("range prefix pattern"));

impl Grammar {
    pub fn detect(value: &str) -> Self {
        if RANGE_PREFIX.is_match(value) {
            Self::Range
        } else {
            Self::List
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Scope {
    First,
    All,
}

struct Rule {
    pattern: Regex,
    replacement: &'static str,
    scope: Scope,
}

impl Rule {
    fn apply(&self, value: &str) -> String {
        match self.scope {
            Scope::First => self.pattern.replace(value, self.replacement).into_owned(),
            Scope::All => self.pattern.replace_all(value, self.replacement).into_owned(),
        }
    }
}

const LIST_RULES: &[(&str, &str, Scope)] = &[
    (r"^,", "", Scope::First),
    (r",{2,}", ",", Scope::All),
    (r"\.{2,}", ".", Scope::All),
    // second dot inside one number
    (r"(\.[0-9]+)\.", "${1}", Scope::All),
    (r"[^0-9,.]", "", Scope::All),
];

const RANGE_RULES: &[(&str, &str, Scope)] = &[
    (r"-{2,}", "-", Scope::First),
    (r"([0-9]+-)[^0-9]+", "${1}", Scope::First),
    (r"([0-9]+-[0-9]+)[^\*\^/\+0-9]+", "${1}", Scope::First),
    (r"([0-9]+-[0-9]+[\*\^/\+])[^0-9]+", "${1}", Scope::First),
    (r"([0-9]+-[0-9]+[\*\^/\+][0-9]+)[^0-9]+", "${1}", Scope::First),
];

fn compile(table: &[(&str, &'static str, Scope)]) -> Vec<Rule> {
    table
        .iter()
        .map(|&(pattern, replacement, scope)| Rule {
            pattern: Regex::new(pattern).expect("sanitizer rule pattern"),
            replacement,
            scope,
        })
        .collect()
}

static LIST_CHAIN: LazyLock<Vec<Rule>> = LazyLock::new(|| compile(LIST_RULES));
static RANGE_CHAIN: LazyLock<Vec<Rule>> = LazyLock::new(|| compile(RANGE_RULES));

fn apply_chain(value: &str) -> String {
    let chain = match Grammar::detect(value) {
        Grammar::List => &LIST_CHAIN,
        Grammar::Range => &RANGE_CHAIN,
    };
    chain
        .iter()
        .fold(value.to_string(), |acc, rule| rule.apply(&acc))
}

/// Strip everything that cannot belong to a list or range expression.
///
/// The chain is re-applied until the value stops changing. Every rule that
/// fires removes at least one character, so this terminates, and the result
/// is a fixed point: `sanitize(sanitize(s)) == sanitize(s)`.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = apply_chain(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

#[cfg(test)]
#[path = "tests/sanitize_tests.rs"]
mod tests;
