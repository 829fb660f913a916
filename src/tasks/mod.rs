//! Named install/maintenance steps and the runner that sequences them.
pub mod configure;
/// Docker installation step.
pub mod docker;
/// Deployment repository download step.
pub mod download;
pub mod launcher;

use std::sync::Arc;

use anyhow::Result;

use crate::cli::InstallOpts;
use crate::config::Settings;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::logging::Log;

/// Shared context for step execution.
pub struct Context {
    /// Where the stack lives and where it comes from.
    pub settings: Settings,
    /// Logger for operator-facing output.
    pub log: Arc<dyn Log>,
    /// Shell command executor (real or test double).
    pub executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("settings", &self.settings)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl Context {
    /// Create a context from its parts.
    #[must_use]
    pub fn new(settings: Settings, log: Arc<dyn Log>, executor: Arc<dyn Executor>) -> Self {
        Self {
            settings,
            log,
            executor,
        }
    }

    /// Run a shell command through the executor, logging it at debug level.
    ///
    /// # Errors
    ///
    /// Propagates the executor's error on spawn failure or non-zero exit.
    pub fn sh(&self, command: &str) -> Result<()> {
        self.log.debug(&format!("$ {command}"));
        self.executor.run(command).map(|_| ())
    }
}

/// Outcome of a successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// The step did its work.
    Ok,
    /// Nothing to do; the message explains why.
    Skipped(String),
}

/// One step of an install, update or restart.
pub trait Task {
    /// Human-readable step name, shown as the stage header.
    fn name(&self) -> &str;

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error if a command fails or a file cannot be written.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The steps of `install`, in execution order.
#[must_use]
pub fn install_tasks(opts: &InstallOpts) -> Vec<Box<dyn Task>> {
    vec![
        Box::new(docker::InstallDocker),
        Box::new(download::DownloadIntercity),
        Box::new(configure::ConfigureIntercity::from_opts(opts)),
        Box::new(launcher::LauncherTask::BUILD),
        Box::new(launcher::LauncherTask::START),
    ]
}

/// Run `tasks` in order, stopping at the first failure.
///
/// Each step gets a stage header and a `Done` line. There is no rollback:
/// whatever earlier steps changed stays changed.
///
/// # Errors
///
/// Returns [`InstallError::Step`] naming the first step that failed.
pub fn run_tasks<'a>(tasks: impl IntoIterator<Item = &'a dyn Task>, ctx: &Context) -> Result<()> {
    for task in tasks {
        ctx.log.stage(task.name());
        match task.run(ctx) {
            Ok(TaskResult::Ok) => ctx.log.info("     Done"),
            Ok(TaskResult::Skipped(reason)) => ctx.log.info(&format!("     {reason}")),
            Err(e) => {
                return Err(InstallError::Step {
                    step: task.name().to_string(),
                    reason: format!("{e:#}"),
                }
                .into());
            }
        }
    }
    Ok(())
}
