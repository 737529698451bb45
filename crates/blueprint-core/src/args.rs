//! Canonical argument shapes shared by both input surfaces
//!
//! CLI flags and interactive answers are reconciled into [`NormalizedArgs`]
//! before a controller ever sees them, so a controller cannot tell which
//! surface an invocation came from.

use std::collections::{BTreeMap, BTreeSet};

/// Per-generator settings bag, passed to the controller verbatim.
pub type Settings = serde_json::Map<String, serde_json::Value>;

/// Value of one logical option after normalization.
///
/// A multi-select option is the partial set of chosen flags: a flag is
/// present iff it was chosen, never recorded as unchosen. Both input paths
/// produce this exact shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Chosen flags of a checkbox option.
    Flags(BTreeSet<String>),
    /// Selected value of a list option.
    Value(String),
}

/// Canonical arguments handed to a generator controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedArgs {
    values: BTreeMap<String, OptionValue>,
}

impl NormalizedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// True when `flag` was chosen for the checkbox option `name`.
    pub fn flag(&self, name: &str, flag: &str) -> bool {
        matches!(self.values.get(name), Some(OptionValue::Flags(flags)) if flags.contains(flag))
    }

    /// Selected value of the list option `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::Value(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}
