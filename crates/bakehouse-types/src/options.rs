//! Backend-native job option maps.
//!
//! An [`OptionSet`] is an insertion-ordered mapping from backend option
//! name to value, built once per `(job_name, container_image)` pair and
//! frozen after construction: the only way to produce one is through
//! [`OptionSetBuilder`], and the built set exposes no mutation API.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single backend option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Str(String),
    Bool(bool),
    List(Vec<String>),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Immutable, insertion-ordered backend option map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(IndexMap<String, OptionValue>);

impl OptionSet {
    /// Start building an option set.
    #[must_use]
    pub fn builder() -> OptionSetBuilder {
        OptionSetBuilder::default()
    }

    /// Look up an option by its backend name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    /// Whether an option is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterate options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builder for [`OptionSet`]; the only construction path.
#[derive(Debug, Default)]
pub struct OptionSetBuilder {
    options: IndexMap<String, OptionValue>,
}

impl OptionSetBuilder {
    /// Set an option. Re-setting a name overwrites in place, keeping the
    /// original insertion position.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Set an option only when a value is present.
    #[must_use]
    pub fn set_opt(self, name: impl Into<String>, value: Option<impl Into<OptionValue>>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    /// Freeze the builder into an immutable [`OptionSet`].
    #[must_use]
    pub fn build(self) -> OptionSet {
        OptionSet(self.options)
    }
}
