use anyhow::Result;

use crate::cli::InstallOpts;
use crate::error::{InstallError, ValidationError};
use crate::state::InstallationState;
use crate::tasks::{self, Context};
use crate::validation::{is_valid_email, is_valid_hostname};

/// What `install` ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The stack was already present; nothing ran.
    AlreadyInstalled,
    /// Every step succeeded.
    Installed {
        /// Address the new instance answers on.
        url: String,
    },
}

/// Run the install command.
///
/// Options are validated only once the stack is known to be absent, and
/// before any command runs.
///
/// # Errors
///
/// Returns [`InstallError::Validation`] for a bad hostname or SSL email, or
/// [`InstallError::Step`] naming the first step that failed.
pub fn run(ctx: &Context, opts: &InstallOpts) -> Result<InstallOutcome> {
    if InstallationState::probe(ctx.settings.marker())?.is_installed() {
        ctx.log.info("Intercity is already installed.");
        ctx.log.info("If you want to update your Intercity instance, run:");
        ctx.log.info("\t intercity-server update");
        return Ok(InstallOutcome::AlreadyInstalled);
    }

    validate(opts).map_err(InstallError::from)?;

    let steps = tasks::install_tasks(opts);
    tasks::run_tasks(steps.iter().map(AsRef::as_ref), ctx)?;

    let url = access_url(opts);
    ctx.log.info("");
    ctx.log.info("Congratulations! Intercity is now installed.");
    ctx.log.info("You can reach your brand new Intercity installation on:");
    ctx.log.info(&format!("    {url}"));

    if opts.use_ssl {
        ctx.log.warn("Please keep in mind that Let's Encrypt can take up to 5 minutes");
        ctx.log.warn("to issue the certificate. Until this is done");
        ctx.log.warn("your Intercity server will be unreachable");
    }

    Ok(InstallOutcome::Installed { url })
}

/// Check install options before touching the machine.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found; the hostname is checked
/// before the SSL email.
pub fn validate(opts: &InstallOpts) -> Result<(), ValidationError> {
    if !is_valid_hostname(&opts.hostname) {
        return Err(ValidationError::InvalidHostname(opts.hostname.clone()));
    }
    if opts.use_ssl && !opts.ssl_email.as_deref().is_some_and(is_valid_email) {
        return Err(ValidationError::InvalidSslEmail);
    }
    Ok(())
}

/// Public address of the instance for the chosen options.
///
/// With `--custom-port` the plain-HTTP suffix is `:880`, not the `8880` the
/// container is mapped to.
#[must_use]
pub fn access_url(opts: &InstallOpts) -> String {
    let protocol = if opts.use_ssl { "https://" } else { "http://" };
    let suffix = match (opts.custom_port, opts.use_ssl) {
        (true, true) => ":8443",
        (true, false) => ":880",
        (false, _) => "",
    };
    format!("{protocol}{}{suffix}", opts.hostname)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use super::*;
    use crate::config::Settings;
    use crate::exec::Executor;
    use crate::logging::MemoryLog;
    use crate::tasks::test_helpers::{RecordingExecutor, make_context};

    fn opts(hostname: &str) -> InstallOpts {
        InstallOpts {
            hostname: hostname.to_string(),
            custom_port: false,
            use_ssl: false,
            ssl_email: None,
        }
    }

    fn context(
        install_dir: &Path,
        exec: &Arc<RecordingExecutor>,
    ) -> (Context, Arc<MemoryLog>) {
        make_context(
            Settings::with_install_dir(install_dir),
            Arc::clone(exec) as Arc<dyn Executor>,
        )
    }

    #[test]
    fn fresh_install_runs_every_step_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("intercity");
        let exec = Arc::new(RecordingExecutor::cloning_into(&dir));
        let (ctx, log) = context(&dir, &exec);

        let outcome = run(&ctx, &opts("demo.example.org")).unwrap();

        let d = dir.display();
        assert_eq!(
            exec.calls(),
            vec![
                "which docker".to_string(),
                "wget -nv -O - https://get.docker.com | sh".to_string(),
                format!("git clone https://github.com/intercity/intercity-docker.git -b 0-4-stable {d}"),
                format!("{d}/launcher bootstrap app"),
                format!("{d}/launcher start app"),
                format!("{d}/launcher restart app"),
            ]
        );
        assert_eq!(
            outcome,
            InstallOutcome::Installed {
                url: "http://demo.example.org".to_string()
            }
        );
        let config = std::fs::read_to_string(dir.join("containers/app.yml")).unwrap();
        assert!(config.contains("INTERCITY_HOSTNAME: \"demo.example.org\""));
        assert_eq!(
            log.at("stage"),
            vec![
                "Installing Docker",
                "Downloading Intercity",
                "Configuring Intercity",
                "Building Intercity",
                "Starting Intercity",
            ]
        );
        assert!(log.contains("Congratulations! Intercity is now installed."));
        assert!(log.at("warn").is_empty());
    }

    #[test]
    fn skips_docker_install_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("intercity");
        let exec = Arc::new(RecordingExecutor {
            docker_present: true,
            ..RecordingExecutor::cloning_into(&dir)
        });
        let (ctx, log) = context(&dir, &exec);

        run(&ctx, &opts("demo.example.org")).unwrap();

        assert!(!exec.calls().iter().any(|c| c.starts_with("wget")));
        assert!(log.contains("     Docker is already installed. Let's continue"));
    }

    #[test]
    fn already_installed_runs_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let exec = Arc::new(RecordingExecutor::default());
        let (ctx, log) = context(tmp.path(), &exec);

        let outcome = run(&ctx, &opts("demo.example.org")).unwrap();

        assert_eq!(outcome, InstallOutcome::AlreadyInstalled);
        assert!(exec.calls().is_empty());
        assert_eq!(
            log.at("info"),
            vec![
                "Intercity is already installed.",
                "If you want to update your Intercity instance, run:",
                "\t intercity-server update",
            ]
        );
    }

    #[test]
    fn already_installed_wins_over_invalid_hostname() {
        let tmp = tempfile::tempdir().unwrap();
        let exec = Arc::new(RecordingExecutor::default());
        let (ctx, _log) = context(tmp.path(), &exec);

        let outcome = run(&ctx, &opts("not a host")).unwrap();
        assert_eq!(outcome, InstallOutcome::AlreadyInstalled);
    }

    #[test]
    fn invalid_hostname_runs_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("intercity");
        let exec = Arc::new(RecordingExecutor::default());
        let (ctx, _log) = context(&dir, &exec);

        let err = run(&ctx, &opts("localhost")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::Validation(ValidationError::InvalidHostname(h))) if h == "localhost"
        ));
        assert!(exec.calls().is_empty());
        assert!(!dir.exists());
    }

    #[test]
    fn ssl_without_email_runs_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("intercity");
        let exec = Arc::new(RecordingExecutor::default());
        let (ctx, _log) = context(&dir, &exec);
        let opts = InstallOpts {
            use_ssl: true,
            ..opts("demo.example.org")
        };

        let err = run(&ctx, &opts).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::Validation(ValidationError::InvalidSslEmail))
        ));
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn ssl_install_warns_about_certificate_delay() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("intercity");
        let exec = Arc::new(RecordingExecutor::cloning_into(&dir));
        let (ctx, log) = context(&dir, &exec);
        let opts = InstallOpts {
            custom_port: true,
            use_ssl: true,
            ssl_email: Some("a@b.com".to_string()),
            ..opts("demo.example.org")
        };

        let outcome = run(&ctx, &opts).unwrap();

        assert_eq!(
            outcome,
            InstallOutcome::Installed {
                url: "https://demo.example.org:8443".to_string()
            }
        );
        assert!(log.at("warn").iter().any(|w| w.contains("up to 5 minutes")));
        let config = std::fs::read_to_string(dir.join("containers/app.yml")).unwrap();
        assert!(config.contains("LETSENCRYPT_ACCOUNT_EMAIL: \"a@b.com\""));
        assert!(config.contains("8443:443"));
    }

    #[test]
    fn failed_step_leaves_marker_and_blocks_reinstall() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("intercity");
        let exec = Arc::new(RecordingExecutor {
            fail_on: Some("bootstrap".to_string()),
            ..RecordingExecutor::cloning_into(&dir)
        });
        let (ctx, log) = context(&dir, &exec);

        let err = run(&ctx, &opts("demo.example.org")).unwrap_err();
        assert!(err.to_string().starts_with("Building Intercity failed"));
        assert!(!exec.calls().iter().any(|c| c.contains(" start ")));
        assert!(!log.contains("Congratulations! Intercity is now installed."));

        let retry = Arc::new(RecordingExecutor::default());
        let (ctx, _log) = context(&dir, &retry);
        assert_eq!(
            run(&ctx, &opts("demo.example.org")).unwrap(),
            InstallOutcome::AlreadyInstalled
        );
        assert!(retry.calls().is_empty());
    }

    #[test]
    fn access_url_variants() {
        let plain = opts("demo.example.org");
        assert_eq!(access_url(&plain), "http://demo.example.org");

        let custom = InstallOpts {
            custom_port: true,
            ..plain.clone()
        };
        assert_eq!(access_url(&custom), "http://demo.example.org:880");

        let ssl = InstallOpts {
            use_ssl: true,
            ..plain.clone()
        };
        assert_eq!(access_url(&ssl), "https://demo.example.org");

        let both = InstallOpts {
            use_ssl: true,
            custom_port: true,
            ..plain
        };
        assert_eq!(access_url(&both), "https://demo.example.org:8443");
    }

    #[test]
    fn validate_checks_hostname_before_email() {
        let opts = InstallOpts {
            use_ssl: true,
            ..opts("bad host")
        };
        assert_eq!(
            validate(&opts),
            Err(ValidationError::InvalidHostname("bad host".to_string()))
        );
    }

    #[test]
    fn validate_rejects_malformed_email() {
        let opts = InstallOpts {
            use_ssl: true,
            ssl_email: Some("ops@localhost".to_string()),
            ..opts("demo.example.org")
        };
        assert_eq!(validate(&opts), Err(ValidationError::InvalidSslEmail));
    }

    #[test]
    fn validate_rejects_email_that_would_break_yaml_quoting() {
        let opts = InstallOpts {
            use_ssl: true,
            ssl_email: Some("a\"b@c.com".to_string()),
            ..opts("demo.example.org")
        };
        assert_eq!(validate(&opts), Err(ValidationError::InvalidSslEmail));
    }

    #[test]
    fn email_not_checked_without_ssl() {
        let opts = InstallOpts {
            ssl_email: Some("garbage".to_string()),
            ..opts("demo.example.org")
        };
        assert_eq!(validate(&opts), Ok(()));
    }
}
