//! Command: rebuild an installed stack.
use anyhow::Result;

use super::run_on_installed;
use crate::state::InstallationState;
use crate::tasks::Context;
use crate::tasks::launcher::LauncherTask;

/// Run the update command.
///
/// # Errors
///
/// Returns an error if the marker cannot be inspected or the rebuild fails.
pub fn run(ctx: &Context) -> Result<InstallationState> {
    run_on_installed(&LauncherTask::UPDATE, ctx)
}
