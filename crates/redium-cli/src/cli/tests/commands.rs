//! Tests for argument parsing of every subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand, Toggle};
use clap::Parser;

#[test]
fn cli_parse_classify() {
    match parse(&["redium", "classify", "https://medium.com/@foo/bar-0123abcd"]) {
        CliCommand::Classify { url } => assert_eq!(url, "https://medium.com/@foo/bar-0123abcd"),
        _ => panic!("expected Classify"),
    }
}

#[test]
fn cli_parse_resolve() {
    match parse(&["redium", "resolve", "https://medium.com/a-0123abcd"]) {
        CliCommand::Resolve { url, service } => {
            assert_eq!(url, "https://medium.com/a-0123abcd");
            assert!(service.is_none());
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_with_service() {
    match parse(&[
        "redium",
        "resolve",
        "https://medium.com/a-0123abcd",
        "--service",
        "12ft",
    ]) {
        CliCommand::Resolve { service, .. } => assert_eq!(service.as_deref(), Some("12ft")),
        _ => panic!("expected Resolve with --service"),
    }
}

#[test]
fn cli_parse_rules_and_services() {
    assert!(matches!(parse(&["redium", "rules"]), CliCommand::Rules));
    assert!(matches!(parse(&["redium", "services"]), CliCommand::Services));
}

#[test]
fn cli_parse_select() {
    match parse(&["redium", "select", "LibMedium"]) {
        CliCommand::Select { service } => assert_eq!(service, "LibMedium"),
        _ => panic!("expected Select"),
    }
}

#[test]
fn cli_parse_auto_redirect() {
    match parse(&["redium", "auto-redirect", "off"]) {
        CliCommand::AutoRedirect { state } => assert_eq!(state, Toggle::Off),
        _ => panic!("expected AutoRedirect"),
    }
    assert!(Cli::try_parse_from(["redium", "auto-redirect", "maybe"]).is_err());
}

#[test]
fn cli_parse_open_defaults() {
    match parse(&["redium", "open", "https://medium.com/a-0123abcd"]) {
        CliCommand::Open { url, tab, manual } => {
            assert_eq!(url, "https://medium.com/a-0123abcd");
            assert_eq!(tab, 1);
            assert!(!manual);
        }
        _ => panic!("expected Open"),
    }
}

#[test]
fn cli_parse_open_manual_tab() {
    match parse(&[
        "redium",
        "open",
        "https://medium.com/a-0123abcd",
        "--tab",
        "12",
        "--manual",
    ]) {
        CliCommand::Open { tab, manual, .. } => {
            assert_eq!(tab, 12);
            assert!(manual);
        }
        _ => panic!("expected Open with --tab --manual"),
    }
}

#[test]
fn cli_parse_global_paths() {
    let cli = Cli::try_parse_from([
        "redium",
        "rules",
        "--config",
        "/tmp/c.toml",
        "--prefs",
        "/tmp/p.json",
    ])
    .unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/c.toml")));
    assert_eq!(cli.prefs.as_deref(), Some(std::path::Path::new("/tmp/p.json")));
}

#[test]
fn cli_parse_completions() {
    match parse(&["redium", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
