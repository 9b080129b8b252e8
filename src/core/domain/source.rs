//! SourceDescriptor type.
//!
//! Identifies where a SecretMap was, or will be, loaded from.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::types::{Region, SecretName};

/// A secret source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// A named secret in the remote store
    Remote { name: SecretName, region: Region },
    /// A local KEY=VALUE file
    LocalFile(PathBuf),
}

impl SourceDescriptor {
    pub fn remote(name: impl Into<SecretName>, region: impl Into<Region>) -> Self {
        Self::Remote {
            name: name.into(),
            region: region.into(),
        }
    }

    pub fn local(path: impl AsRef<Path>) -> Self {
        Self::LocalFile(path.as_ref().to_path_buf())
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { name, region } => write!(f, "remote secret '{}' ({})", name, region),
            Self::LocalFile(path) => write!(f, "local file {}", path.display()),
        }
    }
}
