//! SecretMap type.
//!
//! A resolved set of secrets keyed by variable name.

use std::collections::BTreeMap;
use std::fmt;

use zeroize::Zeroize;

use crate::core::types::SecretKey;

/// Secrets keyed by variable name.
///
/// Entries are kept in lexicographic key order so every export is
/// deterministic. Values are wiped from memory when the map is dropped.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretMap {
    entries: BTreeMap<SecretKey, String>,
}

impl SecretMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value. Returns true if a previous value was replaced.
    pub fn insert(&mut self, key: impl Into<SecretKey>, value: impl Into<String>) -> bool {
        match self.entries.insert(key.into(), value.into()) {
            Some(mut old) => {
                old.zeroize();
                true
            }
            None => false,
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key is present (even with an empty value)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in lexicographic order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in lexicographic key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SecretMap
where
    K: Into<SecretKey>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

// Values never reach logs through Debug.
impl fmt::Debug for SecretMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl Drop for SecretMap {
    fn drop(&mut self) {
        for value in self.entries.values_mut() {
            value.zeroize();
        }
    }
}
