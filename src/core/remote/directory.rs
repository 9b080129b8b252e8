//! Directory-backed remote store.
//!
//! Emulates the remote store on the local filesystem. A secret named
//! `myapp/production` in `us-east-1` lives at
//! `<root>/us-east-1/myapp/production.json`.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use super::RemoteStore;
use crate::core::dotenv::write_atomic;
use crate::error::{Error, Result, StoreError};

/// Filesystem emulation of a secrets store.
#[derive(Debug, Clone)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the JSON file holding a secret.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` if the name or region would escape the root.
    pub fn secret_path(&self, name: &str, region: &str) -> Result<PathBuf> {
        for part in [name, region] {
            let relative = Path::new(part);
            let clean = !part.is_empty()
                && relative
                    .components()
                    .all(|c| matches!(c, Component::Normal(_)));
            if !clean {
                return Err(Error::InvalidArgument(format!(
                    "'{}' is not a valid secret name or region",
                    part
                )));
            }
        }
        Ok(self.root.join(region).join(format!("{}.json", name)))
    }

    fn write(&self, path: &Path, payload: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(transient)?;
        }
        write_atomic(path, payload.as_bytes()).map_err(transient)
    }
}

fn transient(err: io::Error) -> Error {
    StoreError::Transient(err.to_string()).into()
}

fn not_found(name: &str, region: &str) -> Error {
    StoreError::NotFound {
        name: name.to_string(),
        region: region.to_string(),
    }
    .into()
}

impl RemoteStore for Directory {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn describe(&self, name: &str, region: &str) -> Result<bool> {
        let path = self.secret_path(name, region)?;
        debug!(path = %path.display(), "describing secret");
        Ok(path.is_file())
    }

    fn get(&self, name: &str, region: &str) -> Result<Zeroizing<String>> {
        let path = self.secret_path(name, region)?;
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Zeroizing::new(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found(name, region)),
            Err(e) => Err(transient(e)),
        }
    }

    fn create(&self, name: &str, region: &str, payload: &str) -> Result<()> {
        let path = self.secret_path(name, region)?;
        if path.exists() {
            return Err(StoreError::AlreadyExists {
                name: name.to_string(),
                region: region.to_string(),
            }
            .into());
        }
        self.write(&path, payload)
    }

    fn put(&self, name: &str, region: &str, payload: &str) -> Result<()> {
        let path = self.secret_path(name, region)?;
        if !path.is_file() {
            return Err(not_found(name, region));
        }
        self.write(&path, payload)
    }
}
