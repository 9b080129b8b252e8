//! Backup command - save a timestamped copy of the remote secret.

use std::path::PathBuf;

use chrono::Utc;

use crate::cli::context::Context;
use crate::cli::{output, SyncFlags};
use crate::core::sync;
use crate::error::Result;

pub fn execute(ctx: &Context, flags: SyncFlags, dir: Option<PathBuf>) -> Result<()> {
    let settings = ctx.settings();
    let name = settings.require_secret_name()?;
    let dir = dir.unwrap_or_else(|| settings.backup_dir.clone());

    let store = ctx.store()?;
    let result = sync::backup(
        store.as_ref(),
        name,
        &settings.region,
        &dir,
        Utc::now(),
        flags.dry_run,
        flags.force,
    )?;

    let path = output::path(&result.path);
    if result.applied {
        output::success(&format!("backed up {} keys to {}", result.keys, path));
    } else {
        output::warn(&format!("would back up {} keys to {}", result.keys, path));
    }
    Ok(())
}
