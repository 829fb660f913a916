use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the Intercity server installer.
#[derive(Parser, Debug)]
#[command(
    name = "intercity-server",
    about = "Manage your Intercity instance with ease",
    version = crate::VERSION
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to $INTERCITY_SERVER_CONFIG or /etc/intercity-server/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install Docker and Intercity on this server
    Install(InstallOpts),
    /// Rebuild Intercity from the latest stable release
    Update,
    /// Restart the Intercity container
    Restart,
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used to name the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Update => "update",
            Self::Restart => "restart",
            Self::Version => "version",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct InstallOpts {
    /// Hostname Intercity will be reachable on
    #[arg(long)]
    pub hostname: String,

    /// Expose Intercity on ports 8880/8443 instead of 80/443
    #[arg(long)]
    pub custom_port: bool,

    /// Request a Let's Encrypt certificate
    #[arg(long)]
    pub use_ssl: bool,

    /// Contact address for Let's Encrypt (required with --use-ssl)
    #[arg(long, value_name = "EMAIL")]
    pub ssl_email: Option<String>,
}
