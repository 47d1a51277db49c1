use std::{collections::HashMap, fmt};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// One digit-sum step: the `+`-joined digits and the sum they produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ReductionStep {
    pub expression: String,
    pub result: String,
}

impl ReductionStep {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }
}

impl From<(String, String)> for ReductionStep {
    fn from((expression, result): (String, String)) -> Self {
        Self { expression, result }
    }
}

impl From<ReductionStep> for (String, String) {
    fn from(step: ReductionStep) -> Self {
        (step.expression, step.result)
    }
}

/// Ordered log of the steps taken while reducing one number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReductionTrace {
    pub steps: Vec<ReductionStep>,
}

impl ReductionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: ReductionStep) {
        self.steps.push(step);
    }

    /// The digital root, i.e. the result of the last step.
    pub fn root(&self) -> Option<&str> {
        self.steps.last().map(|step| step.result.as_str())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReductionStep> {
        self.steps.iter()
    }
}

/// Number string -> reduction trace, kept in first-insertion order.
///
/// Re-inserting an existing key replaces its trace in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMap {
    entries: Vec<(String, ReductionTrace)>,
    index: HashMap<String, usize>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, number: impl Into<String>, trace: ReductionTrace) {
        let number = number.into();
        match self.index.get(&number) {
            Some(&position) => self.entries[position].1 = trace,
            None => {
                self.index.insert(number.clone(), self.entries.len());
                self.entries.push((number, trace));
            }
        }
    }

    pub fn get(&self, number: &str) -> Option<&ReductionTrace> {
        self.index
            .get(number)
            .map(|&position| &self.entries[position].1)
    }

    pub fn contains_key(&self, number: &str) -> bool {
        self.index.contains_key(number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReductionTrace)> {
        self.entries
            .iter()
            .map(|(number, trace)| (number.as_str(), trace))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(number, _)| number.as_str())
    }
}

impl FromIterator<(String, ReductionTrace)> for ResultMap {
    fn from_iter<I: IntoIterator<Item = (String, ReductionTrace)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (number, trace) in iter {
            map.insert(number, trace);
        }
        map
    }
}

impl Serialize for ResultMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (number, trace) in &self.entries {
            map.serialize_entry(number, trace)?;
        }
        map.end()
    }
}

struct ResultMapVisitor;

impl<'de> Visitor<'de> for ResultMapVisitor {
    type Value = ResultMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of number strings to reduction traces")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = ResultMap::new();
        while let Some((number, trace)) = access.next_entry::<String, ReductionTrace>()? {
            map.insert(number, trace);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ResultMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ResultMapVisitor)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
