//! Raw query-string input, decomposed the way the validator consumes it: an
//! ordered multimap from key to every raw occurrence of that key.
//!
//! Decoding uses `url::form_urlencoded`, so percent-escapes and `+` are
//! handled before validation ever sees a value.

use std::collections::HashSet;

/// Ordered multimap of decoded query parameters.
///
/// Repeated keys are preserved in input order (`?q=foo&q=bar` keeps both
/// occurrences), which is what string-list parameters validate against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryMap {
    pairs: Vec<(String, String)>,
}

impl QueryMap {
    /// Parse a query string (without the leading `?`).
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let pairs = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        QueryMap { pairs }
    }

    /// Split a request target into its path and parsed query string.
    ///
    /// `/items/3?skip=0&limit=10` becomes `("/items/3", {skip, limit})`;
    /// a target without `?` yields an empty map.
    #[must_use]
    pub fn split_target(target: &str) -> (&str, Self) {
        match target.split_once('?') {
            Some((path, query)) => (path, QueryMap::parse(query)),
            None => (target, QueryMap::default()),
        }
    }

    /// Every occurrence of `key`, in input order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// First occurrence of `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` appeared in the query string at all. This is the
    /// presence signal for the validator's first step.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Distinct keys, in first-occurrence order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.pairs
            .iter()
            .filter(|(k, _)| seen.insert(k.as_str()))
            .map(|(k, _)| k.as_str())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
