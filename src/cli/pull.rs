//! Pull command - download the remote secret into the local env file.

use tracing::info;

use crate::cli::context::Context;
use crate::cli::{output, SyncFlags};
use crate::core::sync::{self, SyncAction};
use crate::error::Result;

pub fn execute(ctx: &Context, flags: SyncFlags) -> Result<()> {
    let settings = ctx.settings();
    let name = settings.require_secret_name()?;
    info!(name, dry_run = flags.dry_run, "pull");

    let store = ctx.store()?;
    let result = sync::pull(
        store.as_ref(),
        name,
        &settings.region,
        &settings.env_file,
        &settings.required,
        flags.dry_run,
        flags.force,
    )?;

    let target = output::path(&settings.env_file);
    match (result.action, result.applied) {
        (SyncAction::InSync, _) => output::success(&format!("{} already in sync", target)),
        (_, true) => output::success(&format!("wrote {} ({} keys)", target, result.keys)),
        (SyncAction::Create, false) => {
            output::warn(&format!("would create {} ({} keys)", target, result.keys))
        }
        (SyncAction::Update, false) => {
            output::warn(&format!("would overwrite {} ({} keys)", target, result.keys))
        }
    }
    super::compare::print_report(&result.report, "local", "remote");
    super::push::report_missing(&result.missing, "the remote secret");
    Ok(())
}
