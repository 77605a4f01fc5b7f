// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ordered key/value record storage.

use crate::value::{IntoParameterValue, ParameterValue};

/// Ordered set of named string fields making up one persisted record.
///
/// Invariants
/// - Entry order is insertion order; [`add`](Self::add) on an existing key
///   keeps the original position and only replaces the value.
/// - Keys are unique under ASCII case-insensitive comparison.
/// - The key spelling of the first insertion is preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterCollection {
    entries: Vec<(String, String)>,
}

impl ParameterCollection {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    /// Looks up `key`; a missing key yields [`ParameterValue::MISSING`].
    pub fn get(&self, key: &str) -> ParameterValue<'_> {
        ParameterValue::new(self.position(key).map(|i| self.entries[i].1.as_str()))
    }

    /// Returns `true` when `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Writes `key`, appending it or replacing an existing value in place.
    pub fn add(&mut self, key: &str, value: impl IntoParameterValue) {
        let value = value.into_parameter_value();
        match self.position(key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key.to_owned(), value)),
        }
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Iterates fields in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates keys in record order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Keys whose key or value cannot be represented in the pipe framing.
    /// An empty key is a conflict.
    pub fn framing_conflicts(&self) -> Vec<&str> {
        let bad = |s: &str| s.contains(['|', '\n', '\r']);
        self.entries
            .iter()
            .filter(|(k, v)| k.is_empty() || bad(k) || k.contains('=') || bad(v))
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterCollection
where
    K: AsRef<str>,
    V: IntoParameterValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<K, V> Extend<(K, V)> for ParameterCollection
where
    K: AsRef<str>,
    V: IntoParameterValue,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.add(k.as_ref(), v);
        }
    }
}
