//! Configuration file management.
//!
//! Reads the optional `.tether.toml` and folds it together with CLI flags and
//! environment overrides into the effective [`Settings`].
//!
//! Precedence, highest first: CLI flag or its `TETHER_*` variable, the config
//! file, `AWS_REGION` (region only), built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::core::domain::RequiredKeySet;
use crate::core::remote::BackendKind;
use crate::core::types::{Region, SecretName};
use crate::core::validate::validate_key;
use crate::error::{ConfigError, Error, Result};

/// Contents of `.tether.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub remote: RemoteConfig,
    pub local: LocalConfig,
    pub validate: ValidateConfig,
}

/// `[remote]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Secret name in the remote store
    pub name: Option<SecretName>,
    /// Store region
    pub region: Option<Region>,
    /// Store implementation
    pub backend: BackendKind,
    /// Root for the `directory` backend
    pub directory: Option<PathBuf>,
}

/// `[local]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalConfig {
    pub env_file: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
}

/// `[validate]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidateConfig {
    pub required: Option<Vec<String>>,
}

impl Config {
    /// Default config path in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// `.tether.toml` is read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// `ConfigError::ReadFile`, `ConfigError::Parse`, or `ConfigError::Invalid`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !explicit && !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config = Self::parse(&contents)?;

        debug!(
            remote = config.remote.name.is_some(),
            backend = config.remote.backend.as_str(),
            "config loaded"
        );
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field contents.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if matches!(self.remote.name.as_deref(), Some(n) if n.trim().is_empty()) {
            return Err(ConfigError::Invalid("remote.name cannot be empty".into()).into());
        }
        if matches!(self.remote.region.as_deref(), Some(r) if r.trim().is_empty()) {
            return Err(ConfigError::Invalid("remote.region cannot be empty".into()).into());
        }
        if let Some(required) = &self.validate.required {
            for key in required {
                validate_key(key).map_err(|e| {
                    ConfigError::Invalid(format!("validate.required: {}", e))
                })?;
            }
        }
        Ok(())
    }
}

/// Values supplied on the command line (or their environment variables).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub secret_name: Option<SecretName>,
    pub region: Option<Region>,
    pub env_file: Option<PathBuf>,
    pub store_dir: Option<PathBuf>,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub secret_name: Option<SecretName>,
    pub region: Region,
    pub backend: BackendKind,
    pub store_dir: PathBuf,
    pub env_file: PathBuf,
    pub backup_dir: PathBuf,
    pub required: RequiredKeySet,
}

impl Settings {
    /// Fold config and overrides together.
    pub fn resolve(config: Config, overrides: Overrides) -> Self {
        let aws_region = std::env::var(constants::ENV_AWS_REGION)
            .ok()
            .filter(|r| !r.is_empty());

        // A store directory on the command line implies the directory backend.
        let backend = if overrides.store_dir.is_some() {
            BackendKind::Directory
        } else {
            config.remote.backend
        };

        let required = config
            .validate
            .required
            .map(RequiredKeySet::new)
            .unwrap_or_default();

        Self {
            secret_name: overrides.secret_name.or(config.remote.name),
            region: overrides
                .region
                .or(config.remote.region)
                .or(aws_region)
                .unwrap_or_else(|| constants::DEFAULT_REGION.to_string()),
            backend,
            store_dir: overrides
                .store_dir
                .or(config.remote.directory)
                .unwrap_or_else(|| PathBuf::from(constants::STORE_DIR)),
            env_file: overrides
                .env_file
                .or(config.local.env_file)
                .unwrap_or_else(|| PathBuf::from(constants::ENV_FILE)),
            backup_dir: config
                .local
                .backup_dir
                .unwrap_or_else(|| PathBuf::from(constants::BACKUP_DIR)),
            required,
        }
    }

    /// The remote secret name, required by push/pull/backup/compare.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` when none is configured.
    pub fn require_secret_name(&self) -> Result<&str> {
        self.secret_name.as_deref().ok_or_else(|| {
            Error::InvalidArgument(format!(
                "no remote secret name (pass --secret-name, set {}, or add remote.name to {})",
                constants::ENV_SECRET_NAME,
                constants::CONFIG_FILE
            ))
        })
    }
}
