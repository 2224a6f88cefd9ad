use std::collections::BTreeMap;

use serde::Serialize;

/// Raw values extracted by a parse call, keyed by command name.
///
/// A fresh accumulator is created per parse; values stay as matched text
/// until read through a typed accessor such as
/// [`CommandTree::typed_value`](crate::CommandTree::typed_value).
///
/// # Examples
///
/// ```
/// use command_match_core::ParsedValues;
///
/// let values: ParsedValues = [("-c", "3")].into_iter().collect();
/// assert_eq!(values.get("-c"), Some("3"));
/// assert!(!values.contains("-A"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParsedValues(BTreeMap<String, String>);

impl ParsedValues {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `raw` for `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.0.insert(name.into(), raw.into());
    }

    /// Raw value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(name, raw)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParsedValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
