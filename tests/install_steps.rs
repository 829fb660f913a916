#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the `install` step list.
//!
//! The order of the steps is part of the installer's contract: Docker must be
//! present before the launcher runs, and the container config must exist
//! before it is bootstrapped.

use std::collections::HashSet;

use intercity_server::cli::InstallOpts;
use intercity_server::tasks;

fn opts(custom_port: bool, use_ssl: bool) -> InstallOpts {
    InstallOpts {
        hostname: "demo.example.org".to_string(),
        custom_port,
        use_ssl,
        ssl_email: use_ssl.then(|| "ops@example.org".to_string()),
    }
}

/// Snapshot of all install step names in their declared order.
#[test]
fn install_step_names() {
    let steps = tasks::install_tasks(&opts(false, false));
    let names: Vec<&str> = steps.iter().map(|t| t.name()).collect();
    insta::assert_snapshot!("install_step_names", names.join("\n"));
}

/// Flags change what a step does, never which steps run.
#[test]
fn flags_do_not_change_step_list() {
    let names = |o: &InstallOpts| -> Vec<String> {
        tasks::install_tasks(o)
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    };
    let baseline = names(&opts(false, false));
    assert_eq!(names(&opts(true, false)), baseline);
    assert_eq!(names(&opts(false, true)), baseline);
    assert_eq!(names(&opts(true, true)), baseline);
}

/// No two install steps may share the same name.
#[test]
fn install_step_names_are_unique() {
    let steps = tasks::install_tasks(&opts(true, true));
    let mut seen: HashSet<&str> = HashSet::new();
    for step in &steps {
        assert!(
            seen.insert(step.name()),
            "duplicate install step name: '{}'",
            step.name()
        );
    }
}
