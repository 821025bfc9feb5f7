use crate::codec::PATH_SEPARATOR;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// A coerced parameter value, or a nested group of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Group(CollectedParams),
}

impl ParamValue {
    pub fn is_group(&self) -> bool {
        matches!(self, ParamValue::Group(_))
    }

    pub fn as_group(&self) -> Option<&CollectedParams> {
        match self {
            ParamValue::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ParamValue::Integer(n) => serde_json::Value::from(*n),
            ParamValue::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ParamValue::Boolean(b) => serde_json::Value::Bool(*b),
            ParamValue::String(s) => serde_json::Value::String(s.clone()),
            ParamValue::Group(group) => group.to_json(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(n) => write!(f, "{}", n),
            ParamValue::Float(n) => write!(f, "{}", n),
            ParamValue::Boolean(b) => write!(f, "{}", b),
            ParamValue::String(s) => write!(f, "\"{}\"", s),
            ParamValue::Group(group) => write!(f, "{}", group),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<CollectedParams> for ParamValue {
    fn from(value: CollectedParams) -> Self {
        ParamValue::Group(value)
    }
}

/// The nested parameter object handed to an invocation sink.
///
/// Keys keep the order in which they were first collected, so serialization is
/// deterministic for a given input.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CollectedParams {
    entries: IndexMap<String, ParamValue>,
}

impl CollectedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Looks up a value by its dotted path, descending through groups.
    pub fn get_path(&self, path: &str) -> Option<&ParamValue> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut value = self.entries.get(segments.next()?)?;
        for segment in segments {
            value = value.as_group()?.entries.get(segment)?;
        }
        Some(value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ParamValue> {
        self.entries.iter()
    }

    /// Sets `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the group stored under `name`, creating it on first visit.
    ///
    /// A primitive already stored under `name` is replaced by an empty group.
    pub(crate) fn group_entry(&mut self, name: &str) -> &mut CollectedParams {
        let slot = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| ParamValue::Group(CollectedParams::new()));

        if !slot.is_group() {
            warn!(parameter = name, previous = %slot, "leaf value replaced by a nested group");
            *slot = ParamValue::Group(CollectedParams::new());
        }

        match slot {
            ParamValue::Group(group) => group,
            _ => unreachable!("slot holds a group after replacement"),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl fmt::Display for CollectedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (name, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}

impl<'a> IntoIterator for &'a CollectedParams {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
