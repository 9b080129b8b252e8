//! Resolution type.

use super::{SecretMap, SourceDescriptor};
use crate::error::Result;

/// A loaded SecretMap together with the source that produced it.
#[derive(Debug, Clone)]
pub struct Resolution {
    map: SecretMap,
    source: SourceDescriptor,
}

/// Outcome of loading one source.
pub type ResolutionResult = Result<Resolution>;

impl Resolution {
    pub fn new(map: SecretMap, source: SourceDescriptor) -> Self {
        Self { map, source }
    }

    pub fn map(&self) -> &SecretMap {
        &self.map
    }

    pub fn source(&self) -> &SourceDescriptor {
        &self.source
    }

    /// Split into the map and its source.
    pub fn into_parts(self) -> (SecretMap, SourceDescriptor) {
        (self.map, self.source)
    }
}
