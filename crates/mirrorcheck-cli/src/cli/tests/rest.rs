//! Tests for list and config.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_list() {
    match parse(&["mirrorcheck", "list", "--mirrors", "docs/mirrors.md"]) {
        CliCommand::List { mirrors } => assert_eq!(mirrors, Path::new("docs/mirrors.md")),
        _ => panic!("expected List"),
    }
}

#[test]
fn cli_parse_config() {
    match parse(&["mirrorcheck", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}

#[test]
fn cli_rejects_unknown_command() {
    use clap::Parser;
    assert!(crate::cli::Cli::try_parse_from(["mirrorcheck", "resume", "1"]).is_err());
}
