//! Command: print version information.
use crate::exec::shell_quote;
use crate::state::InstallationState;
use crate::tasks::Context;

/// Lines printed by `version`.
///
/// Always includes the installer version. When a stack is installed, the
/// deployed revision follows, or `unknown` if git cannot describe it.
#[must_use]
pub fn lines(ctx: &Context) -> Vec<String> {
    let mut out = vec![format!("intercity-server: {}", crate::VERSION)];
    let installed = InstallationState::probe(ctx.settings.marker())
        .is_ok_and(InstallationState::is_installed);
    if installed {
        out.push(format!("intercity: {}", deployed_revision(ctx)));
    }
    out
}

fn deployed_revision(ctx: &Context) -> String {
    let command = format!(
        "git -C {} describe --tags --always",
        shell_quote(&ctx.settings.install_dir.to_string_lossy())
    );
    ctx.log.debug(&format!("$ {command}"));
    match ctx.executor.run_unchecked(&command) {
        Ok(result) if result.success && !result.stdout.trim().is_empty() => {
            result.stdout.trim().to_string()
        }
        _ => "unknown".to_string(),
    }
}

/// Print the version lines to stdout.
#[allow(clippy::print_stdout)]
pub fn run(ctx: &Context) {
    for line in lines(ctx) {
        println!("{line}");
    }
}
