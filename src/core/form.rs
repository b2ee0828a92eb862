//! Flat form input submitted with a mutation request

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Flat mapping from field name to string value
///
/// Mirrors browser form semantics: when a field name repeats, [`FormData::get`]
/// returns the first submitted value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: IndexMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ordered `(name, value)` pairs as decoded from the body
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            form.fields.entry(name.into()).or_insert_with(|| value.into());
        }
        form
    }

    /// Builder-style setter, replacing an existing value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pick the named fields into a JSON object for schema parsing
    ///
    /// Absent fields become `null` so the schema reports them as missing.
    pub fn pick(&self, names: &[&str]) -> Value {
        let object: Map<String, Value> = names
            .iter()
            .map(|name| {
                let value = self
                    .get(name)
                    .map_or(Value::Null, |v| Value::String(v.to_string()));
                ((*name).to_string(), value)
            })
            .collect();
        Value::Object(object)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
