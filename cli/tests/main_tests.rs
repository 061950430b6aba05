//! # BeFast CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! Top-level behavior of the `befast` binary: standard flags, the `version`
//! command and its alias, and exit codes for invalid invocations.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    Sandbox::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dotenv_example"))
        .stdout(predicate::str::contains("compose"));
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_and_alias() {
    let sandbox = Sandbox::new();
    for name in ["version", "v"] {
        sandbox
            .cmd()
            .arg(name)
            .assert()
            .success()
            .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_unknown_command_exits_one() {
    Sandbox::new().cmd().arg("launch").assert().code(1);
}

#[test]
fn test_invalid_compose_direction_exits_one() {
    Sandbox::new()
        .cmd()
        .args(["compose", "sideways"])
        .assert()
        .code(1);
}

#[test]
fn test_malformed_config_fails_host_commands() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.config_path(), "host = [").unwrap();
    sandbox
        .cmd()
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse TOML"));
}

#[test]
fn test_malformed_config_does_not_block_local_commands() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.config_path(), "host = [").unwrap();
    for name in ["version", "v", "cwd", "dotenv_example"] {
        sandbox.cmd().arg(name).assert().success();
    }
    // Unknown keys are rejected by the store but ignored by local commands too.
    std::fs::write(sandbox.config_path(), "hots = \"typo\"\n").unwrap();
    sandbox
        .cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
    assert!(sandbox.path().join(".env").is_file());
}
