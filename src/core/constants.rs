//! Constants used throughout tether.
//!
//! Centralizes file names, defaults and environment variable names.

/// Configuration file name (.tether.toml).
pub const CONFIG_FILE: &str = ".tether.toml";

/// Default local secrets file (.env).
pub const ENV_FILE: &str = ".env";

/// Default directory for `tether backup`.
pub const BACKUP_DIR: &str = "backups";

/// Default directory for the `directory` remote backend.
pub const STORE_DIR: &str = ".tether/store";

/// Region used when neither config nor environment names one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Keys the application cannot start without.
pub const DEFAULT_REQUIRED_KEYS: &[&str] = &[
    "HOSTNAME",
    "ADMIN_EMAILS",
    "SMTP_ADDRESS",
    "SMTP_USER_NAME",
    "SMTP_PASSWORD",
];

/// Mode every secrets file written to disk must end with.
pub const SECRET_FILE_MODE: u32 = 0o600;

/// Environment overrides.
pub const ENV_SECRET_NAME: &str = "TETHER_SECRET_NAME";
pub const ENV_REGION: &str = "TETHER_REGION";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_ENV_FILE: &str = "TETHER_ENV_FILE";
pub const ENV_STORE_DIR: &str = "TETHER_STORE_DIR";
