//! Container configuration: copy the sample and fill in operator values.
//!
//! The sample `app.yml` is treated as opaque text. Each setting is applied by
//! replacing a literal placeholder, so if the upstream template changes a
//! substitution silently matches nothing; we log a warning in that case.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::cli::InstallOpts;
use crate::patch::replace_in_file;

/// Hostname placeholder in the sample configuration.
pub const HOSTNAME_PLACEHOLDER: &str = "intercity.example.com";

const HTTP_PORT_MAPPING: (&str, &str) = ("80:80", "8880:80");
const HTTPS_PORT_MAPPING: (&str, &str) = ("443:443", "8443:443");
const SSL_TEMPLATE: (&str, &str) = (
    "#- \"templates/web.ssl.template.yml\"",
    "- \"templates/web.ssl.template.yml\"",
);
const LETSENCRYPT_TEMPLATE: (&str, &str) = (
    "#- \"templates/web.letsencrypt.ssl.template.yml\"",
    "- \"templates/web.letsencrypt.ssl.template.yml\"",
);
const EMAIL_LINE: &str = "LETSENCRYPT_ACCOUNT_EMAIL: \"example@example.com\"";

/// Write `containers/<name>.yml` from the sample with the operator's choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureIntercity {
    hostname: String,
    custom_port: bool,
    /// Let's Encrypt contact; `Some` means SSL is enabled.
    ssl_email: Option<String>,
}

impl ConfigureIntercity {
    /// Build the step from validated install options.
    #[must_use]
    pub fn from_opts(opts: &InstallOpts) -> Self {
        Self {
            hostname: opts.hostname.clone(),
            custom_port: opts.custom_port,
            ssl_email: opts
                .use_ssl
                .then(|| opts.ssl_email.clone().unwrap_or_default()),
        }
    }

    /// Literal `(old, new)` substitutions, in the order they are applied.
    #[must_use]
    pub fn substitutions(&self) -> Vec<(String, String)> {
        let pair = |(old, new): (&str, &str)| (old.to_string(), new.to_string());

        let mut subs = vec![(HOSTNAME_PLACEHOLDER.to_string(), self.hostname.clone())];
        if self.custom_port {
            subs.push(pair(HTTP_PORT_MAPPING));
            subs.push(pair(HTTPS_PORT_MAPPING));
        }
        if let Some(email) = &self.ssl_email {
            subs.push(pair(SSL_TEMPLATE));
            subs.push(pair(LETSENCRYPT_TEMPLATE));
            subs.push((
                EMAIL_LINE.to_string(),
                format!("LETSENCRYPT_ACCOUNT_EMAIL: \"{email}\""),
            ));
        }
        subs
    }
}

impl Task for ConfigureIntercity {
    fn name(&self) -> &str {
        "Configuring Intercity"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let sample = ctx.settings.sample_config();
        let target = ctx.settings.container_config();

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::copy(&sample, &target).with_context(|| {
            format!("copying {} to {}", sample.display(), target.display())
        })?;
        ctx.log.debug(&format!(
            "copied {} to {}",
            sample.display(),
            target.display()
        ));

        for (old, new) in self.substitutions() {
            let count = replace_in_file(&target, &old, &new)?;
            if count == 0 {
                ctx.log.warn(&format!(
                    "'{old}' not found in {}; left unchanged",
                    target.display()
                ));
            } else {
                ctx.log.debug(&format!("replaced {count} x '{old}'"));
            }
        }
        Ok(TaskResult::Ok)
    }
}
