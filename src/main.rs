//! `intercity-server` binary entry point.
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use intercity_server::cli::{Cli, Command};
use intercity_server::commands;
use intercity_server::config::{Settings, resolve_settings_path};
use intercity_server::error::{InstallError, ValidationError};
use intercity_server::exec::SystemExecutor;
use intercity_server::logging::{self, Log, Logger};
use intercity_server::tasks::Context;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, args.command.name());
    let log = Arc::new(Logger::new(args.command.name()));

    match run(&args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(validation) = validation_error(&e) {
                for line in validation.guidance() {
                    log.error(line);
                }
            } else {
                log.error(&format!("{e:#}"));
                if let Some(path) = log.log_path() {
                    log.info(&format!("See {} for details", path.display()));
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli, log: &Arc<Logger>) -> Result<()> {
    let settings_path = resolve_settings_path(args.config.as_deref());
    let settings = match Settings::load(&settings_path) {
        Ok(settings) => settings,
        // `version` reports what it can even with a broken settings file.
        Err(e) if matches!(args.command, Command::Version) => {
            log.debug(&format!("{e}; using defaults"));
            Settings::default()
        }
        Err(e) => return Err(e.into()),
    };
    log.debug(&format!("settings: {}", settings_path.display()));

    let ctx = Context::new(
        settings,
        Arc::clone(log) as Arc<dyn Log>,
        Arc::new(SystemExecutor),
    );

    match &args.command {
        Command::Install(opts) => {
            commands::install::run(&ctx, opts)?;
        }
        Command::Update => {
            commands::update::run(&ctx)?;
        }
        Command::Restart => {
            commands::restart::run(&ctx)?;
        }
        Command::Version => commands::version::run(&ctx),
    }
    Ok(())
}

fn validation_error(e: &anyhow::Error) -> Option<&ValidationError> {
    match e.downcast_ref::<InstallError>() {
        Some(InstallError::Validation(v)) => Some(v),
        _ => e.downcast_ref::<ValidationError>(),
    }
}
