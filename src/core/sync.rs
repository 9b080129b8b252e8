//! One-directional synchronization between the local file and the remote
//! store: push, pull, backup, compare.
//!
//! One side is authoritative per operation (push: local file, pull and
//! backup: remote store), so the result always replaces the other side.
//! With `dry_run` every operation loads and compares as usual and stops
//! before the first write.
//!
//! Push and pull check the source against the required keys. Missing keys
//! are reported in the result, not raised: the destination may legitimately
//! be filled in over several pushes, and `validate` is the gate.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::core::domain::{ComparisonReport, RequiredKeySet, SecretMap};
use crate::core::export::{to_file, to_remote_payload, RemoteWrite};
use crate::core::loader::{load_from_file, load_from_remote};
use crate::core::merge::{diff, diff_values, overwrite};
use crate::core::remote::RemoteStore;
use crate::core::types::SecretKey;
use crate::core::validate::missing_keys;
use crate::error::{FileError, Result, StoreError};

/// What a push or pull does (or would do) to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Destination did not exist
    Create,
    /// Destination existed and is replaced
    Update,
    /// Destination already matches; nothing written
    InSync,
}

/// Result of a push or pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub action: SyncAction,
    /// Destination compared against source (a = destination, b = source)
    pub report: ComparisonReport,
    /// Number of keys in the source
    pub keys: usize,
    /// Whether anything was written
    pub applied: bool,
    /// Required keys the source lacks or leaves empty
    pub missing: Vec<SecretKey>,
}

/// Result of a backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupResult {
    pub path: PathBuf,
    pub keys: usize,
    pub applied: bool,
}

/// Upload the local file to the remote secret.
///
/// Creates the secret when absent. When it exists and differs, `force` is
/// required.
///
/// # Errors
///
/// Local load errors; `AlreadyExists` when the remote differs and `force` is
/// false; store errors from describe/get/create/put.
pub fn push(
    store: &dyn RemoteStore,
    name: &str,
    region: &str,
    env_file: &Path,
    required: &RequiredKeySet,
    dry_run: bool,
    force: bool,
) -> Result<SyncResult> {
    info!(name, region, dry_run, force, "running push");

    let local = load_from_file(env_file)?.into_parts().0;
    let missing = check_required(&local, required, "local file");

    let remote = if store.describe(name, region)? {
        match load_from_remote(store, name, region) {
            Ok(resolution) => Some(resolution.into_parts().0),
            Err(e) if force => {
                warn!(error = %e, "existing remote secret is unreadable, overwriting");
                Some(SecretMap::new())
            }
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    let (action, report) = match &remote {
        None => (SyncAction::Create, diff(&SecretMap::new(), &local)),
        Some(current) => {
            let report = diff_values(current, &local);
            if *current == local && !force {
                (SyncAction::InSync, report)
            } else if !force {
                return Err(StoreError::AlreadyExists {
                    name: name.to_string(),
                    region: region.to_string(),
                }
                .into());
            } else {
                (SyncAction::Update, report)
            }
        }
    };

    let mut result = SyncResult {
        action,
        report,
        keys: local.len(),
        applied: false,
        missing,
    };

    if dry_run || action == SyncAction::InSync {
        return Ok(result);
    }

    let payload = overwrite(remote.unwrap_or_default(), &local);
    result.action = match to_remote_payload(&payload, store, name, region)? {
        RemoteWrite::Created => SyncAction::Create,
        RemoteWrite::Updated => SyncAction::Update,
    };
    result.applied = true;
    Ok(result)
}

/// Download the remote secret into the local file.
///
/// # Errors
///
/// Remote load errors; `AlreadyExists` when the file exists, differs, and
/// `force` is false; `IOError` on write failure.
pub fn pull(
    store: &dyn RemoteStore,
    name: &str,
    region: &str,
    env_file: &Path,
    required: &RequiredKeySet,
    dry_run: bool,
    force: bool,
) -> Result<SyncResult> {
    info!(name, region, dry_run, force, "running pull");

    let remote = load_from_remote(store, name, region)?.into_parts().0;
    let missing = check_required(&remote, required, "remote secret");

    let local = if env_file.exists() {
        Some(load_from_file(env_file)?.into_parts().0)
    } else {
        None
    };

    let (action, report) = match &local {
        None => (SyncAction::Create, diff(&SecretMap::new(), &remote)),
        Some(current) => {
            let report = diff_values(current, &remote);
            if *current == remote && !force {
                (SyncAction::InSync, report)
            } else if !force {
                return Err(FileError::AlreadyExists(env_file.to_path_buf()).into());
            } else {
                (SyncAction::Update, report)
            }
        }
    };

    let mut result = SyncResult {
        action,
        report,
        keys: remote.len(),
        applied: false,
        missing,
    };

    if dry_run || action == SyncAction::InSync {
        return Ok(result);
    }

    let contents = overwrite(local.unwrap_or_default(), &remote);
    to_file(&contents, env_file, force)?;
    result.applied = true;
    Ok(result)
}

/// Copy the remote secret into a timestamped file under `dir`.
///
/// # Errors
///
/// Remote load errors; `AlreadyExists` if the backup path is taken and
/// `force` is false; `IOError` if `dir` cannot be created or written.
pub fn backup(
    store: &dyn RemoteStore,
    name: &str,
    region: &str,
    dir: &Path,
    at: DateTime<Utc>,
    dry_run: bool,
    force: bool,
) -> Result<BackupResult> {
    info!(name, region, dry_run, force, "running backup");

    let remote = load_from_remote(store, name, region)?.into_parts().0;
    let path = dir.join(backup_file_name(name, at));

    let mut result = BackupResult {
        path,
        keys: remote.len(),
        applied: false,
    };

    if dry_run {
        return Ok(result);
    }

    std::fs::create_dir_all(dir).map_err(|source| FileError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    to_file(&remote, &result.path, force)?;
    result.applied = true;
    Ok(result)
}

/// Compare the remote secret (a) with the local file (b).
///
/// With `values`, shared keys whose values differ are reported too.
///
/// # Errors
///
/// Load errors from either side.
pub fn compare(
    store: &dyn RemoteStore,
    name: &str,
    region: &str,
    env_file: &Path,
    values: bool,
) -> Result<ComparisonReport> {
    info!(name, region, values, "running compare");

    let remote = load_from_remote(store, name, region)?;
    let local = load_from_file(env_file)?;

    Ok(if values {
        diff_values(remote.map(), local.map())
    } else {
        diff(remote.map(), local.map())
    })
}

fn check_required(map: &SecretMap, required: &RequiredKeySet, source: &str) -> Vec<SecretKey> {
    let missing = missing_keys(map, required);
    if !missing.is_empty() {
        warn!(source, missing = missing.len(), "source lacks required keys");
    }
    missing
}

/// `myapp/production` at 2024-01-02 03:04:05 UTC becomes
/// `myapp_production-20240102T030405Z.env`.
pub fn backup_file_name(name: &str, at: DateTime<Utc>) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}-{}.env", stem, at.format("%Y%m%dT%H%M%SZ"))
}
