//! Comparing and reconciling two secret maps.

use crate::core::domain::{ComparisonReport, SecretMap};

/// Key-level symmetric difference of two maps.
///
/// Values are not compared; two maps are in sync when they hold the same
/// key set.
pub fn diff(a: &SecretMap, b: &SecretMap) -> ComparisonReport {
    ComparisonReport::new(keys_missing_from(a, b), keys_missing_from(b, a), Vec::new())
}

/// Like [`diff`], and also lists shared keys whose values differ.
pub fn diff_values(a: &SecretMap, b: &SecretMap) -> ComparisonReport {
    let differing = a
        .iter()
        .filter(|(key, value)| b.get(key).is_some_and(|other| other != *value))
        .map(|(key, _)| key.to_string())
        .collect();

    ComparisonReport::new(keys_missing_from(a, b), keys_missing_from(b, a), differing)
}

/// Replace `target` wholesale with `source`.
///
/// One side is always authoritative per operation, so there is no
/// field-level merge: the result equals `source`.
pub fn overwrite(target: SecretMap, source: &SecretMap) -> SecretMap {
    drop(target);
    source.clone()
}

fn keys_missing_from(from: &SecretMap, other: &SecretMap) -> Vec<String> {
    from.keys()
        .filter(|key| !other.contains_key(key))
        .map(str::to_string)
        .collect()
}
