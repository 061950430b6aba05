//! # BeFast CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command
//! runs inside its own temporary working directory with `BEFAST_CONFIG`
//! pointing into it, so tests never read or write the real user config and
//! never touch files in the repository.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory plus config file location.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Sandbox {
            dir: tempfile::tempdir().expect("Failed to create sandbox directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("befast.toml")
    }

    /// Writes a config file with the given host and apikey.
    pub fn with_credentials(self, host: &str, apikey: &str) -> Self {
        fs::write(
            self.config_path(),
            format!("host = \"{}\"\napikey = \"{}\"\n", host, apikey),
        )
        .expect("Failed to write sandbox config");
        self
    }

    /// `befast` running in the sandbox with logging and debug switches cleared.
    pub fn cmd(&self) -> Command {
        let mut cmd = befast_cmd();
        cmd.current_dir(self.path())
            .env("BEFAST_CONFIG", self.config_path())
            .env_remove("DEBUG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

/// `assert_cmd::Command` for the compiled `befast` binary.
pub fn befast_cmd() -> Command {
    Command::cargo_bin("befast").expect("Failed to find befast binary for testing")
}
