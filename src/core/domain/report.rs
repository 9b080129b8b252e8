//! ComparisonReport type.
//!
//! Represents the key-level comparison between two secret sources.

use crate::core::types::SecretKey;

/// Keys found on only one side of a comparison, plus (optionally) shared
/// keys whose values differ.
///
/// All lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    only_in_a: Vec<SecretKey>,
    only_in_b: Vec<SecretKey>,
    differing: Vec<SecretKey>,
}

impl ComparisonReport {
    /// Create a report. Lists are sorted on construction.
    pub fn new(
        mut only_in_a: Vec<SecretKey>,
        mut only_in_b: Vec<SecretKey>,
        mut differing: Vec<SecretKey>,
    ) -> Self {
        only_in_a.sort();
        only_in_b.sort();
        differing.sort();
        Self {
            only_in_a,
            only_in_b,
            differing,
        }
    }

    /// Keys present only in the first source.
    pub fn only_in_a(&self) -> &[SecretKey] {
        &self.only_in_a
    }

    /// Keys present only in the second source.
    pub fn only_in_b(&self) -> &[SecretKey] {
        &self.only_in_b
    }

    /// Shared keys with different values. Empty unless values were compared.
    pub fn differing(&self) -> &[SecretKey] {
        &self.differing
    }

    /// Whether both sources hold the same key set.
    pub fn is_in_sync(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }

    /// Whether any shared key has a different value.
    pub fn has_value_drift(&self) -> bool {
        !self.differing.is_empty()
    }

    /// The same report seen from the other side.
    pub fn swapped(&self) -> Self {
        Self {
            only_in_a: self.only_in_b.clone(),
            only_in_b: self.only_in_a.clone(),
            differing: self.differing.clone(),
        }
    }
}
