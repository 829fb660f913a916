//! Domain-specific error types for the Intercity installer.
//!
//! Internal modules return typed errors (e.g., [`ValidationError`],
//! [`InstallError`]) while command handlers at the CLI boundary carry them
//! inside [`anyhow::Error`] via the standard `?` operator. `main` downcasts
//! to decide what the user sees.
//!
//! # Error hierarchy
//!
//! ```text
//! InstallError
//! ├── Validation(ValidationError) : bad hostname / SSL email, nothing touched yet
//! ├── Step { step, .. }           : a shell step of install/update/restart failed
//! ├── Patch { path, .. }          : the container config could not be rewritten
//! ├── Probe { path, .. }          : the installation marker could not be stat'ed
//! └── Settings { path, .. }       : the settings file is unreadable or invalid
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Input rejected before any side effect was performed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The `--hostname` value is not a plausible domain name.
    #[error("Hostname is not valid: '{0}'")]
    InvalidHostname(String),

    /// `--use-ssl` was given without a usable `--ssl-email`.
    #[error("A valid email address is required to enable SSL")]
    InvalidSslEmail,
}

impl ValidationError {
    /// Lines shown to the operator when this validation fails.
    #[must_use]
    pub fn guidance(&self) -> &'static [&'static str] {
        match self {
            Self::InvalidHostname(_) => &["Hostname is not valid.", "Installation cannot continue."],
            Self::InvalidSslEmail => &[
                "In order to enable SSL you need to provide a valid email address",
                "that we can register with Let's Encrypt.",
                "You can do so with the '--ssl-email=' flag",
            ],
        }
    }
}

/// Top-level error type for installer operations.
#[derive(Error, Debug)]
pub enum InstallError {
    /// Command-line input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A named step (e.g. "Building Intercity") failed.
    #[error("{step} failed: {reason}")]
    Step {
        /// Human-readable step name.
        step: String,
        /// Rendered cause of the failure.
        reason: String,
    },

    /// Reading or writing a patched file failed.
    #[error("Could not patch {}: {source}", .path.display())]
    Patch {
        /// File being patched.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The installation marker exists in an unknown state.
    #[error("Could not inspect installation at {}: {source}", .path.display())]
    Probe {
        /// Marker path that was checked.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file could not be loaded.
    #[error("Invalid settings file {}: {message}", .path.display())]
    Settings {
        /// Settings file path.
        path: PathBuf,
        /// Parser or I/O message.
        message: String,
    },
}
