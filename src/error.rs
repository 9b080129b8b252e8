//! Error types.
//!
//! One top-level [`Error`] wraps a small enum per concern, the way each
//! pipeline stage reports failure. [`Error::kind`] flattens the tree into the
//! eight kinds callers branch on.

use std::path::PathBuf;

use thiserror::Error;

/// Flat classification of every failure tether can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AuthError,
    TransientError,
    ParseError,
    MissingKeys,
    AlreadyExists,
    IoError,
    InvalidArgument,
}

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("required program not found: {0}")]
    MissingTool(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures talking to the remote secrets store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("secret '{name}' not found in {region}")]
    NotFound { name: String, region: String },

    #[error("not authorized: {0}")]
    Auth(String),

    #[error("remote store unavailable: {0}")]
    Transient(String),

    #[error("malformed secret payload: {0}")]
    Parse(String),

    #[error("secret '{name}' already exists in {region}")]
    AlreadyExists { name: String, region: String },

    #[error("remote backend '{0}' is not available in this build")]
    Unsupported(String),
}

/// Failures reading or writing a local secrets file.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("file already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("key cannot be empty")]
    EmptyKey,

    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("value for {0} contains a newline and cannot be written as KEY=VALUE")]
    MultilineValue(String),
}

/// Configuration file failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Store(e) => match e {
                StoreError::NotFound { .. } => ErrorKind::NotFound,
                StoreError::Auth(_) => ErrorKind::AuthError,
                StoreError::Transient(_) => ErrorKind::TransientError,
                StoreError::Parse(_) => ErrorKind::ParseError,
                StoreError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
                StoreError::Unsupported(_) => ErrorKind::InvalidArgument,
            },
            Error::File(e) => match e {
                FileError::NotFound(_) => ErrorKind::NotFound,
                FileError::AlreadyExists(_) => ErrorKind::AlreadyExists,
                FileError::Read { .. } | FileError::Write { .. } => ErrorKind::IoError,
            },
            Error::Validation(e) => match e {
                ValidationError::MissingKeys(_) => ErrorKind::MissingKeys,
                _ => ErrorKind::InvalidArgument,
            },
            Error::Config(e) => match e {
                ConfigError::ReadFile(_) => ErrorKind::IoError,
                ConfigError::Parse(_) => ErrorKind::ParseError,
                ConfigError::Invalid(_) => ErrorKind::InvalidArgument,
            },
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::MissingTool(_) => ErrorKind::NotFound,
            Error::Io(_) => ErrorKind::IoError,
        }
    }

    /// The missing key list, when this is a validation failure.
    pub fn missing_keys(&self) -> Option<&[String]> {
        match self {
            Error::Validation(ValidationError::MissingKeys(keys)) => Some(keys),
            _ => None,
        }
    }

    /// A remediation hint for the user, if one applies.
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::Store(StoreError::Auth(_)) => Some(
                "configure AWS credentials (run: aws configure, or aws sso login)".to_string(),
            ),
            Error::Store(StoreError::NotFound { .. }) => {
                Some("create it with: tether push".to_string())
            }
            Error::Store(StoreError::Transient(_)) => {
                Some("check network access to the secrets store and retry".to_string())
            }
            Error::Store(StoreError::Parse(_)) => Some(
                "the remote secret must be a flat JSON object of A-Z_ keys and string values"
                    .to_string(),
            ),
            Error::Store(StoreError::AlreadyExists { .. }) => {
                Some("update it instead with: tether push --force".to_string())
            }
            Error::Store(StoreError::Unsupported(_)) => {
                Some("rebuild with: cargo install tether --features aws".to_string())
            }
            Error::File(FileError::NotFound(path)) => Some(format!(
                "create {} or pull it with: tether pull",
                path.display()
            )),
            Error::File(FileError::AlreadyExists(_)) => {
                Some("re-run with --force to overwrite".to_string())
            }
            Error::Validation(ValidationError::MissingKeys(_)) => Some(
                "set them in the remote secret or the local env file, then re-run".to_string(),
            ),
            Error::Config(_) => Some("check .tether.toml".to_string()),
            Error::MissingTool(program) => {
                Some(format!("install {} or check your PATH", program))
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
