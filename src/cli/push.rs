//! Push command - upload the local env file to the remote secret.

use tracing::info;

use crate::cli::context::Context;
use crate::cli::{output, SyncFlags};
use crate::core::sync::{self, SyncAction, SyncResult};
use crate::error::Result;

pub fn execute(ctx: &Context, flags: SyncFlags) -> Result<()> {
    let settings = ctx.settings();
    let name = settings.require_secret_name()?;
    info!(name, dry_run = flags.dry_run, "push");

    let store = ctx.store()?;
    let result = sync::push(
        store.as_ref(),
        name,
        &settings.region,
        &settings.env_file,
        &settings.required,
        flags.dry_run,
        flags.force,
    )?;

    report(name, &result);
    Ok(())
}

fn report(name: &str, result: &SyncResult) {
    let target = output::key(name);
    match (result.action, result.applied) {
        (SyncAction::InSync, _) => output::success(&format!("{} already in sync", target)),
        (SyncAction::Create, true) => {
            output::success(&format!("created {} ({} keys)", target, result.keys))
        }
        (SyncAction::Update, true) => {
            output::success(&format!("updated {} ({} keys)", target, result.keys))
        }
        (SyncAction::Create, false) => {
            output::warn(&format!("would create {} ({} keys)", target, result.keys))
        }
        (SyncAction::Update, false) => {
            output::warn(&format!("would update {} ({} keys)", target, result.keys))
        }
    }
    super::compare::print_report(&result.report, "remote", "local");
    report_missing(&result.missing, "the local file");
}

/// Warn about required keys the pushed or pulled source lacks.
pub(crate) fn report_missing(missing: &[String], source: &str) {
    if missing.is_empty() {
        return;
    }
    output::warn(&format!(
        "{} lacks {} required key{}",
        source,
        missing.len(),
        if missing.len() == 1 { "" } else { "s" }
    ));
    for key in missing {
        output::list_item(key);
    }
    output::hint("set them before deploying; tether run refuses to start without them");
}
