//! Materializing a SecretMap into its sinks.
//!
//! Three sinks: an environment (the current process, a child command, or an
//! in-memory recorder), a local file, and the remote store.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::core::domain::SecretMap;
use crate::core::dotenv::EnvFile;
use crate::core::remote::{encode_payload, RemoteStore};
use crate::core::validate::validate_key;
use crate::error::{Error, Result};

/// Somewhere environment variables can be set.
pub trait EnvSink {
    /// Set one variable.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the sink cannot hold this name or value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// The environment of the current process.
///
/// Variables set here are inherited by every child process spawned
/// afterwards.
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl EnvSink for ProcessEnv {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // set_var panics on these
        if key.is_empty() || key.contains(['=', '\0']) {
            return Err(Error::InvalidArgument(format!(
                "'{}' is not a valid environment variable name",
                key.escape_debug()
            )));
        }
        if value.contains('\0') {
            return Err(Error::InvalidArgument(format!(
                "value for {} contains a NUL byte",
                key
            )));
        }
        std::env::set_var(key, value);
        Ok(())
    }
}

/// Records variables in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSink for MemoryEnv {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.vars.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The environment of a child command that has not been spawned yet.
impl EnvSink for Command {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.env(key, value);
        Ok(())
    }
}

/// Which branch `to_remote_payload` took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteWrite {
    Created,
    Updated,
}

/// Export every entry into `sink`, values as-is.
///
/// Keys are checked before anything is set, so a map with one bad key
/// leaves the sink untouched.
///
/// # Errors
///
/// `InvalidArgument` if a key does not match `[A-Z_]+` or the sink refuses
/// an entry.
pub fn to_process_environment(map: &SecretMap, sink: &mut dyn EnvSink) -> Result<()> {
    for key in map.keys() {
        validate_key(key)?;
    }
    for (key, value) in map.iter() {
        sink.set(key, value)?;
    }
    debug!(keys = map.len(), "exported secrets to environment");
    Ok(())
}

/// Write the map as a KEY=VALUE file with mode 600.
///
/// # Errors
///
/// `AlreadyExists` if `path` exists and `force` is false; `IOError` if the
/// path is not writable.
pub fn to_file(map: &SecretMap, path: impl AsRef<Path>, force: bool) -> Result<()> {
    let path = path.as_ref();
    EnvFile::new(map.clone(), path).save(force)?;
    info!(path = %path.display(), keys = map.len(), "wrote secrets file");
    Ok(())
}

/// Store the map as a JSON payload, creating the secret if it is absent and
/// updating it otherwise.
///
/// The existence check and the write are two calls; a concurrent creator can
/// slip in between and make `create` fail with `AlreadyExists`.
pub fn to_remote_payload(
    map: &SecretMap,
    store: &dyn RemoteStore,
    name: &str,
    region: &str,
) -> Result<RemoteWrite> {
    let payload = encode_payload(map);

    let outcome = if store.describe(name, region)? {
        store.put(name, region, &payload)?;
        RemoteWrite::Updated
    } else {
        store.create(name, region, &payload)?;
        RemoteWrite::Created
    };

    info!(name, region, keys = map.len(), ?outcome, "wrote remote secret");
    Ok(outcome)
}
