//! Render context

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// The key/value environment used to fill template placeholders
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(BTreeMap<String, Value>);

impl RenderContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a variable
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a variable as a string slice
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Whether the context has no variables
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of variables
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>> Extend<(K, Value)> for RenderContext {
    fn extend<T: IntoIterator<Item = (K, Value)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RenderContext {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}
