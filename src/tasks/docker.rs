use anyhow::Result;

use super::{Context, Task, TaskResult};

/// Install Docker with the upstream convenience script unless it is on PATH.
#[derive(Debug)]
pub struct InstallDocker;

impl InstallDocker {
    fn install_command(ctx: &Context) -> String {
        format!("wget -nv -O - {} | sh", ctx.settings.docker_install_url)
    }
}

impl Task for InstallDocker {
    fn name(&self) -> &str {
        "Installing Docker"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.executor.which("docker") {
            return Ok(TaskResult::Skipped(
                "Docker is already installed. Let's continue".to_string(),
            ));
        }
        ctx.sh(&Self::install_command(ctx))?;
        Ok(TaskResult::Ok)
    }
}
