//! Top-level subcommand orchestration.
/// `install`: Docker, clone, configure, bootstrap, start.
pub mod install;
pub mod restart;
pub mod update;
pub mod version;

use anyhow::Result;

use crate::state::InstallationState;
use crate::tasks::{self, Context, Task};

/// Run a single maintenance step against an existing installation.
///
/// When nothing is installed yet, prints how to install instead and succeeds
/// without running anything.
///
/// # Errors
///
/// Returns an error if the marker cannot be inspected or the step fails.
pub fn run_on_installed(task: &dyn Task, ctx: &Context) -> Result<InstallationState> {
    let state = InstallationState::probe(ctx.settings.marker())?;
    if state.is_installed() {
        tasks::run_tasks([task], ctx)?;
    } else {
        ctx.log.info("Intercity is not installed.");
        ctx.log.info("To install Intercity, run:");
        ctx.log.info("\t intercity-server install");
    }
    Ok(state)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Settings;
    use crate::exec::Executor;
    use crate::tasks::launcher::LauncherTask;
    use crate::tasks::test_helpers::{RecordingExecutor, make_context};

    #[test]
    fn prints_install_hint_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let exec = Arc::new(RecordingExecutor::default());
        let (ctx, log) = make_context(
            Settings::with_install_dir(tmp.path().join("absent")),
            Arc::clone(&exec) as Arc<dyn Executor>,
        );

        let state = run_on_installed(&LauncherTask::RESTART, &ctx).unwrap();

        assert_eq!(state, InstallationState::NotInstalled);
        assert!(exec.calls().is_empty());
        assert_eq!(
            log.at("info"),
            vec![
                "Intercity is not installed.",
                "To install Intercity, run:",
                "\t intercity-server install",
            ]
        );
    }

    #[test]
    fn runs_step_when_installed() {
        let tmp = tempfile::tempdir().unwrap();
        let exec = Arc::new(RecordingExecutor::default());
        let (ctx, log) = make_context(
            Settings::with_install_dir(tmp.path()),
            Arc::clone(&exec) as Arc<dyn Executor>,
        );

        let state = run_on_installed(&LauncherTask::RESTART, &ctx).unwrap();

        assert_eq!(state, InstallationState::Installed);
        assert_eq!(exec.calls().len(), 1);
        assert_eq!(log.at("stage"), vec!["Restarting Intercity"]);
    }
}
