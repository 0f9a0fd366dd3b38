//! Integration tests for the archon CLI skeleton.
//!
//! These tests verify the CLI structure and argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn archon() -> Command {
    Command::cargo_bin("archon").expect("archon binary should exist")
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    archon()
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Centrally governed tooling configuration",
        ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    archon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    archon()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("archon"));
}

#[test]
fn test_version_command_shows_version() {
    archon()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("archon 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    archon()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"version":"0.1.0"}"#));
}

// --- Command hierarchy tests ---

#[test]
fn test_help_shows_resolve_command() {
    archon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn test_help_shows_explain_command() {
    archon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn test_help_shows_config_command() {
    archon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_unknown_command_fails() {
    archon().arg("frobnicate").assert().failure();
}

#[test]
fn test_resolve_help_shows_scope_flags() {
    archon()
        .args(["resolve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--team"))
        .stdout(predicate::str::contains("--workspace"));
}
