//! Pure input validation for hostnames and Let's Encrypt contact emails.
//!
//! Nothing here touches the filesystem or spawns processes, so validation can
//! run before any installation step.

use regex::Regex;
use std::sync::LazyLock;

/// One DNS label: alphanumerics and inner hyphens, at most 63 characters.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern; cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("valid regex")
});

/// Final label: alphabetic TLD or a punycode (`xn--`) label.
static TLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^([A-Za-z]{1,63}|[Xx][Nn]--[A-Za-z0-9-]{1,59})$").expect("valid regex")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[^@\s."\\]+(\.[^@\s."\\]+)+$"#)
        .expect("valid regex")
});

const MAX_HOSTNAME_LEN: usize = 253;

/// Return `true` if `hostname` looks like a fully qualified domain name.
///
/// Requires at least two dot-separated labels, rejects whitespace, empty
/// labels and labels with leading or trailing hyphens.
///
/// ```
/// use intercity_server::validation::is_valid_hostname;
///
/// assert!(is_valid_hostname("demo.example.org"));
/// assert!(!is_valid_hostname("localhost"));
/// assert!(!is_valid_hostname("demo example.org"));
/// ```
#[must_use]
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    let labels: Vec<&str> = hostname.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    !rest.is_empty() && TLD_RE.is_match(tld) && rest.iter().all(|l| LABEL_RE.is_match(l))
}

/// Return `true` if `email` has the shape `local@domain.tld`.
///
/// ```
/// use intercity_server::validation::is_valid_email;
///
/// assert!(is_valid_email("a@b.com"));
/// assert!(!is_valid_email("a@localhost"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
