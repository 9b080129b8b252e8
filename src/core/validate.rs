//! Validation of resolved secrets and user input.

use std::path::Path;

use tracing::debug;

use crate::core::domain::{RequiredKeySet, SecretMap};
use crate::core::types::SecretKey;
use crate::error::{Result, ValidationError};

/// Check that every required key is present with a non-empty value.
///
/// All violations are collected, in the order of `required`, so the caller
/// can report the complete list at once. The map is not modified.
///
/// # Errors
///
/// Returns `ValidationError::MissingKeys` listing every absent or empty key.
pub fn validate(map: &SecretMap, required: &RequiredKeySet) -> Result<()> {
    let missing = missing_keys(map, required);

    debug!(
        required = required.len(),
        missing = missing.len(),
        "validated secrets"
    );

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingKeys(missing).into())
    }
}

/// Required keys that are absent from `map` or empty, in declared order.
pub fn missing_keys(map: &SecretMap, required: &RequiredKeySet) -> Vec<SecretKey> {
    required
        .iter()
        .filter(|key| map.get(key).map_or(true, str::is_empty))
        .map(str::to_string)
        .collect()
}

/// Whether a key matches `^[A-Z_]+$`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_uppercase() || b == b'_')
}

/// Validate a key name supplied by the user.
///
/// # Errors
///
/// Returns `ValidationError::EmptyKey` or `ValidationError::InvalidKey`.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if let Some((i, ch)) = key
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_uppercase() && *ch != '_')
    {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: format!(
                "invalid character '{}' at position {}. Only A-Z and underscore are allowed",
                ch,
                i + 1
            ),
        }
        .into());
    }

    Ok(())
}

/// Whether a file has exactly the given permission bits (Unix only).
#[cfg(unix)]
pub fn has_file_mode(path: &Path, expected_mode: u32) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    Ok(metadata.permissions().mode() & 0o777 == expected_mode)
}

#[cfg(not(unix))]
pub fn has_file_mode(_path: &Path, _expected_mode: u32) -> Result<bool> {
    Ok(true)
}
