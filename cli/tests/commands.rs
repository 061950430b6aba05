//! # BeFast Command Integration Tests
//!
//! File: cli/tests/commands.rs
//!
//! Runs the compiled binary for the commands that work without a BeFast host
//! or a Docker daemon, and checks the usage errors of the ones that need a
//! host. Network and Docker interactions are covered by the unit tests
//! through fake runners and issuers.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_cwd_prints_working_directory() {
    let sandbox = Sandbox::new();
    let name = sandbox
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    sandbox
        .cmd()
        .arg("cwd")
        .assert()
        .success()
        .stdout(predicate::str::contains(name));
}

#[test]
fn test_dotenv_example_appends_missing_keys() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.path().join(".env"), "A=1").unwrap();
    fs::write(sandbox.path().join(".env.example"), "A=2\nB=3\n#comment\n").unwrap();

    sandbox.cmd().arg("dotenv_example").assert().success();
    let expected = "A=1\n# BeFast added missed variables:\nB=3";
    assert_eq!(fs::read_to_string(sandbox.path().join(".env")).unwrap(), expected);

    // Second run leaves the file alone.
    sandbox.cmd().arg("dotenv_example").assert().success();
    assert_eq!(fs::read_to_string(sandbox.path().join(".env")).unwrap(), expected);
}

#[test]
fn test_dotenv_example_creates_files() {
    let sandbox = Sandbox::new();
    sandbox.cmd().arg("dotenv_example").assert().success();
    assert!(sandbox.path().join(".env").is_file());
    assert!(sandbox.path().join(".env.example").is_file());
}

#[test]
fn test_compose_without_directory_fails_after_reconciling() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.path().join(".env.example"), "PORT=3000").unwrap();

    sandbox
        .cmd()
        .arg("compose")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No compose directory"));

    let env = fs::read_to_string(sandbox.path().join(".env")).unwrap();
    assert!(env.contains("PORT=3000"));
}

#[test]
fn test_compose_with_no_files_succeeds() {
    let sandbox = Sandbox::new();
    fs::create_dir(sandbox.path().join("compose")).unwrap();
    fs::write(sandbox.path().join("compose/README.md"), "not a stack").unwrap();

    sandbox.cmd().args(["compose", "down"]).assert().success();
}

#[test]
fn test_login_without_host_is_usage_error() {
    Sandbox::new()
        .cmd()
        .arg("login")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing host"))
        .stderr(predicate::str::contains("befast login [host]"));
}

#[test]
fn test_init_without_name_lists_examples() {
    Sandbox::new()
        .cmd()
        .arg("init")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("static"))
        .stderr(predicate::str::contains("befast init [name]"));
}

#[test]
fn test_init_without_host_is_usage_error() {
    Sandbox::new()
        .cmd()
        .args(["init", "demo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing host"));
}

#[test]
fn test_deploy_without_host_is_usage_error() {
    Sandbox::new()
        .cmd()
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing host"));
}

#[test]
fn test_domains_add_missing_arguments() {
    let sandbox = Sandbox::new().with_credentials("befast.acme.dev", "key");
    sandbox
        .cmd()
        .args(["domains", "add"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing domain"));
    sandbox
        .cmd()
        .args(["domains", "add", "shop.acme.dev"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing project"));
}

#[test]
fn test_domains_add_without_host_is_usage_error() {
    Sandbox::new()
        .cmd()
        .args(["domains", "add", "shop.acme.dev", "shop"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing host"));
}

#[test]
fn test_failure_is_reported_once() {
    Sandbox::new()
        .cmd()
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing host"))
        .stderr(predicate::str::contains("Command execution failed").not());
}
