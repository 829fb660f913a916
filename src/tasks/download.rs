use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::exec::shell_quote;

/// Clone the deployment repository into the install directory.
///
/// The directory is created first, so it marks the stack as installed even if
/// the clone itself fails afterwards.
#[derive(Debug)]
pub struct DownloadIntercity;

impl DownloadIntercity {
    fn clone_command(ctx: &Context) -> String {
        let s = &ctx.settings;
        format!(
            "git clone {} -b {} {}",
            shell_quote(&s.repository_url),
            shell_quote(&s.branch),
            shell_quote(&s.install_dir.to_string_lossy()),
        )
    }
}

impl Task for DownloadIntercity {
    fn name(&self) -> &str {
        "Downloading Intercity"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let dir = &ctx.settings.install_dir;
        std::fs::create_dir_all(dir).with_context(|| {
            format!(
                "Could not create Intercity installation directory {}",
                dir.display()
            )
        })?;
        ctx.sh(&Self::clone_command(ctx))
            .context("Could not download Intercity")?;
        Ok(TaskResult::Ok)
    }
}
