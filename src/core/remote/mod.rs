//! Remote secrets store.
//!
//! A secret in the remote store is addressed by name and region and holds a
//! flat JSON object mapping `[A-Z_]+` keys to string values.
//!
//! ## Backends
//!
//! - **aws**: Feature-gated (`aws`). AWS Secrets Manager.
//! - **directory**: One JSON file per secret under a local directory. Used for
//!   offline development and integration tests.
//! - **memory**: In-process map, for unit tests and embedding.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use zeroize::Zeroizing;

use crate::core::domain::SecretMap;
use crate::core::validate::is_valid_key;
use crate::error::{Result, StoreError};

#[cfg(feature = "aws")]
mod aws;
mod directory;
mod memory;

#[cfg(feature = "aws")]
pub use aws::AwsSecretsManager;
pub use directory::Directory;
pub use memory::{Memory, MemoryWrite};

/// Operations the pipeline needs from a secrets store.
///
/// `describe` followed by `create` or `put` is not atomic; two operators
/// pushing at once may both see "absent". That race is accepted.
pub trait RemoteStore {
    /// Backend name for display.
    fn name(&self) -> &'static str;

    /// Whether a secret exists.
    ///
    /// # Errors
    ///
    /// `StoreError::Auth` or `StoreError::Transient` when the store cannot
    /// answer. Absence is `Ok(false)`, not an error.
    fn describe(&self, name: &str, region: &str) -> Result<bool>;

    /// Fetch the raw payload of a secret.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the secret does not exist.
    fn get(&self, name: &str, region: &str) -> Result<Zeroizing<String>>;

    /// Create a new secret.
    ///
    /// # Errors
    ///
    /// `StoreError::AlreadyExists` if the name is taken.
    fn create(&self, name: &str, region: &str, payload: &str) -> Result<()>;

    /// Replace the value of an existing secret.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the secret does not exist.
    fn put(&self, name: &str, region: &str, payload: &str) -> Result<()>;
}

/// A store that could not be opened. Every call fails with the reason, so
/// callers that degrade on remote failure can treat it like any other
/// unreachable store.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: StoreError,
}

impl Unavailable {
    pub fn new(reason: StoreError) -> Self {
        Self { reason }
    }
}

impl RemoteStore for Unavailable {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn describe(&self, _name: &str, _region: &str) -> Result<bool> {
        Err(self.reason.clone().into())
    }

    fn get(&self, _name: &str, _region: &str) -> Result<Zeroizing<String>> {
        Err(self.reason.clone().into())
    }

    fn create(&self, _name: &str, _region: &str, _payload: &str) -> Result<()> {
        Err(self.reason.clone().into())
    }

    fn put(&self, _name: &str, _region: &str, _payload: &str) -> Result<()> {
        Err(self.reason.clone().into())
    }
}

/// Which remote store implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Aws,
    Directory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Directory => "directory",
        }
    }
}

/// Open the configured backend.
///
/// # Errors
///
/// `StoreError::Unsupported` when `aws` is requested from a build without
/// the `aws` feature.
pub fn open(kind: BackendKind, directory: &Path) -> Result<Box<dyn RemoteStore>> {
    match kind {
        BackendKind::Directory => {
            info!(path = %directory.display(), "using directory backend");
            Ok(Box::new(Directory::new(directory)))
        }
        #[cfg(feature = "aws")]
        BackendKind::Aws => {
            info!("using AWS Secrets Manager backend");
            Ok(Box::new(AwsSecretsManager::new()))
        }
        #[cfg(not(feature = "aws"))]
        BackendKind::Aws => Err(StoreError::Unsupported(kind.as_str().to_string()).into()),
    }
}

/// Parse a remote payload into a map.
///
/// The payload must be a flat JSON object whose values are all strings.
/// Numeric-looking values stay strings; nested values are rejected.
///
/// # Errors
///
/// Returns `StoreError::Parse` describing the first offending key: one that
/// does not match `[A-Z_]+` or whose value is not a string. Values are never
/// echoed into the message.
pub fn decode_payload(payload: &str) -> Result<SecretMap> {
    let object: BTreeMap<String, serde_json::Value> = serde_json::from_str(payload)
        .map_err(|e| StoreError::Parse(format!("expected a JSON object ({})", json_error(&e))))?;

    let mut map = SecretMap::new();
    for (key, value) in object {
        if key.is_empty() {
            return Err(StoreError::Parse("empty key".to_string()).into());
        }
        if !is_valid_key(&key) {
            return Err(StoreError::Parse(format!(
                "invalid key '{}': keys must match [A-Z_]+",
                key.escape_debug()
            ))
            .into());
        }
        match value {
            serde_json::Value::String(s) => {
                map.insert(key, s);
            }
            other => {
                return Err(StoreError::Parse(format!(
                    "value for {} is a {}, expected a string",
                    key,
                    json_type(&other)
                ))
                .into());
            }
        }
    }

    Ok(map)
}

/// Serialize a map as a flat JSON object.
pub fn encode_payload(map: &SecretMap) -> Zeroizing<String> {
    let object: BTreeMap<&str, &str> = map.iter().collect();
    // Serializing a map of strings cannot fail.
    Zeroizing::new(serde_json::to_string(&object).unwrap_or_default())
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn json_error(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        serde_json::error::Category::Io => "io error",
        serde_json::error::Category::Syntax => "syntax error",
        serde_json::error::Category::Data => "not an object",
        serde_json::error::Category::Eof => "unexpected end of input",
    }
}
