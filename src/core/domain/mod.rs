//! Domain types.

mod map;
mod report;
mod required;
mod resolution;
mod source;

pub use map::SecretMap;
pub use report::ComparisonReport;
pub use required::RequiredKeySet;
pub use resolution::{Resolution, ResolutionResult};
pub use source::SourceDescriptor;
