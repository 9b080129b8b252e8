//! Loading secret sources into a SecretMap.
//!
//! Both loaders are read-only and safe to retry.

use std::path::Path;

use tracing::debug;

use crate::core::domain::{Resolution, ResolutionResult, SourceDescriptor};
use crate::core::dotenv::EnvFile;
use crate::core::remote::{decode_payload, RemoteStore};

/// Load a secret from the remote store.
///
/// # Errors
///
/// `NotFound`, `AuthError`, `TransientError` from the store, or `ParseError`
/// if the payload is not a flat JSON object of strings under valid keys.
pub fn load_from_remote(store: &dyn RemoteStore, name: &str, region: &str) -> ResolutionResult {
    debug!(backend = store.name(), name, region, "loading remote secret");

    let payload = store.get(name, region)?;
    let map = decode_payload(&payload)?;

    debug!(keys = map.len(), "remote secret loaded");
    Ok(Resolution::new(map, SourceDescriptor::remote(name, region)))
}

/// Load a local KEY=VALUE file.
///
/// # Errors
///
/// `NotFound` if the file does not exist; `IOError` if it cannot be read.
pub fn load_from_file(path: impl AsRef<Path>) -> ResolutionResult {
    let path = path.as_ref();
    let map = EnvFile::load(path)?.into_map();
    Ok(Resolution::new(map, SourceDescriptor::local(path)))
}

/// Load whichever source `source` describes.
pub fn load(source: &SourceDescriptor, store: &dyn RemoteStore) -> ResolutionResult {
    match source {
        SourceDescriptor::Remote { name, region } => load_from_remote(store, name, region),
        SourceDescriptor::LocalFile(path) => load_from_file(path),
    }
}
