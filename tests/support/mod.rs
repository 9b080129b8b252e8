//! Test support utilities for tether integration tests.
//!
//! Provides an isolated project directory with a directory-backed remote
//! store, plus helpers to seed and inspect both sides.

#![allow(dead_code)]

pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// No process-global state is mutated. Child processes get their working
/// directory and `TETHER_*` variables explicitly, so tests run in parallel.
pub struct Test {
    /// Project directory (the child's working directory)
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Empty project: no env file, empty store.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        Self { dir, home }
    }

    /// Project with a local `.env`.
    pub fn with_env(content: &str) -> Self {
        let t = Self::new();
        t.write_env(content);
        t
    }

    /// Project with the default secret seeded in the store.
    pub fn with_remote(payload: &str) -> Self {
        let t = Self::new();
        t.seed_remote(payload);
        t
    }

    /// Root of the directory-backed store.
    pub fn store_dir(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    /// Path to a file inside the project directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Path of the default secret inside the store.
    pub fn remote_path(&self) -> PathBuf {
        self.store_dir()
            .join(REGION)
            .join(format!("{}.json", SECRET_NAME))
    }

    /// Write the project's `.env` with mode 600.
    pub fn write_env(&self, content: &str) {
        write_private(&self.path(".env"), content);
    }

    /// Read the project's `.env`.
    pub fn read_env(&self) -> String {
        std::fs::read_to_string(self.path(".env")).expect("failed to read .env")
    }

    /// Store `payload` as the default secret.
    pub fn seed_remote(&self, payload: &str) {
        let path = self.remote_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        write_private(&path, payload);
    }

    /// Read the default secret, if it exists.
    pub fn read_remote(&self) -> Option<serde_json::Value> {
        let raw = std::fs::read_to_string(self.remote_path()).ok()?;
        Some(serde_json::from_str(&raw).expect("remote payload is not JSON"))
    }
}

fn write_private(path: &std::path::Path, content: &str) {
    std::fs::write(path, content).expect("failed to write file");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).unwrap();
    }
}
