//! Type aliases for domain concepts.

/// A secret key name (e.g., SMTP_PASSWORD).
///
/// Keys read from a local file or the remote store match `^[A-Z_]+$`.
pub type SecretKey = String;

/// Name of a secret in the remote store (e.g., `myapp/production`).
pub type SecretName = String;

/// Remote store region (e.g., `us-east-1`).
pub type Region = String;
