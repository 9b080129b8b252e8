//! RequiredKeySet type.

use crate::core::constants::DEFAULT_REQUIRED_KEYS;
use crate::core::types::SecretKey;

/// Ordered set of keys that must resolve to non-empty values.
///
/// Duplicates are dropped, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredKeySet {
    keys: Vec<SecretKey>,
}

impl RequiredKeySet {
    /// Build from any sequence of key names
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SecretKey>,
    {
        let mut out: Vec<SecretKey> = Vec::new();
        for key in keys {
            let key = key.into();
            if !out.contains(&key) {
                out.push(key);
            }
        }
        Self { keys: out }
    }

    /// Keys in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for RequiredKeySet {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_KEYS.iter().copied())
    }
}
