//! Per-invocation context shared by commands.

use std::path::Path;

use tracing::debug;

use crate::core::config::{Config, Overrides, Settings};
use crate::core::domain::RequiredKeySet;
use crate::core::remote::{self, RemoteStore, Unavailable};
use crate::core::validate::validate_key;
use crate::error::{Error, Result};

/// Effective settings plus helpers to open what they point at.
pub struct Context {
    settings: Settings,
}

impl Context {
    /// Load config and apply CLI overrides.
    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let config = Config::load(config_path)?;
        let settings = Settings::resolve(config, overrides);
        debug!(
            secret_name = settings.secret_name.as_deref().unwrap_or("-"),
            region = settings.region.as_str(),
            backend = settings.backend.as_str(),
            env_file = %settings.env_file.display(),
            "settings resolved"
        );
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Open the remote store; fails if the backend is unusable.
    pub fn store(&self) -> Result<Box<dyn RemoteStore>> {
        remote::open(self.settings.backend, &self.settings.store_dir)
    }

    /// Open the remote store, or a stand-in that fails every call with the
    /// reason it could not be opened.
    pub fn store_or_unavailable(&self) -> Result<Box<dyn RemoteStore>> {
        match self.store() {
            Ok(store) => Ok(store),
            Err(Error::Store(reason)) => Ok(Box::new(Unavailable::new(reason))),
            Err(e) => Err(e),
        }
    }

    /// Required keys from `--require` flags, or the configured set.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a flag value is not a valid key.
    pub fn required(&self, require: &[String]) -> Result<RequiredKeySet> {
        if require.is_empty() {
            return Ok(self.settings.required.clone());
        }
        for key in require {
            validate_key(key)?;
        }
        Ok(RequiredKeySet::new(require.iter().cloned()))
    }
}
