//! Installer and maintenance tool for a self-hosted Intercity stack.
//!
//! `intercity-server` prepares a Linux host for Intercity: it installs
//! Docker, clones the deployment repository, writes the container
//! configuration and drives the repository's `launcher` script. The same
//! binary later rebuilds or restarts the running container.
//!
//! The public API is organised into a few layers:
//!
//! - **[`commands`]**: `install`, `update`, `restart` and `version`
//! - **[`tasks`]**: named steps run in order by a fail-fast runner
//! - **[`exec`]**, **[`patch`]**, **[`state`]**: shell commands, literal
//!   file patching and the installed/not-installed probe
//! - **[`validation`]**: hostname and email checks done before any side effect
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

/// Command-line definition.
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod patch;
pub mod state;
pub mod tasks;
pub mod validation;

/// Installer version, overridable at build time with `INTERCITY_SERVER_VERSION`.
pub const VERSION: &str = match option_env!("INTERCITY_SERVER_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
