//! Steps that delegate to the deployment repository's `launcher` script.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::exec::shell_quote;

/// A step made of one or more `launcher <action> <container>` invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LauncherTask {
    name: &'static str,
    actions: &'static [&'static str],
}

impl LauncherTask {
    /// Build the container images for the first time.
    pub const BUILD: Self = Self {
        name: "Building Intercity",
        actions: &["bootstrap"],
    };

    /// Start the freshly built container, then restart it so it picks up
    /// its final configuration.
    pub const START: Self = Self {
        name: "Starting Intercity",
        actions: &["start", "restart"],
    };

    /// Rebuild the container from the current deployment repository.
    pub const UPDATE: Self = Self {
        name: "Updating Intercity",
        actions: &["rebuild"],
    };

    /// Restart the running container.
    pub const RESTART: Self = Self {
        name: "Restarting Intercity",
        actions: &["restart"],
    };

    /// Launcher sub-commands run by this step, in order.
    #[must_use]
    pub const fn actions(&self) -> &'static [&'static str] {
        self.actions
    }
}

/// Full shell command for `launcher <action> <container>`.
#[must_use]
pub fn launcher_command(ctx: &Context, action: &str) -> String {
    format!(
        "{} {action} {}",
        shell_quote(&ctx.settings.launcher().to_string_lossy()),
        shell_quote(&ctx.settings.container),
    )
}

impl Task for LauncherTask {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for action in self.actions {
            ctx.sh(&launcher_command(ctx, action))?;
        }
        Ok(TaskResult::Ok)
    }
}
