//! # Docker Compose Invocation
//!
//! File: cli/src/common/docker/compose.rs
//!
//! ## Overview
//!
//! Builds and runs a single `docker compose` call for one compose file:
//!
//! ```bash
//! docker compose -f compose/web.yml --env-file .env up -d --wait
//! docker compose -f compose/web.yml --env-file .env down
//! ```
//!
//! Looping over files, classifying failures and reporting live in
//! `commands::compose`.
//!
use crate::common::process::{CommandOutput, CommandRunner};
use crate::core::error::Result;
use clap::ValueEnum;
use std::fmt;
use std::path::Path;

/// Whether stacks are brought up or torn down.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeDirection {
    /// `up -d --wait`: start detached and wait for health checks.
    #[default]
    Up,
    /// `down`: stop and remove the stack's containers.
    Down,
}

impl ComposeDirection {
    /// Compose verb plus its flags.
    pub fn verb_args(self) -> &'static [&'static str] {
        match self {
            ComposeDirection::Up => &["up", "-d", "--wait"],
            ComposeDirection::Down => &["down"],
        }
    }
}

impl fmt::Display for ComposeDirection {
    /// The verb as passed to `docker compose`, e.g. `up -d --wait`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.verb_args().join(" "))
    }
}

/// Full argument list after `docker`.
pub fn compose_args(file: &Path, env_file: &Path, direction: ComposeDirection) -> Vec<String> {
    let mut out = vec![
        "compose".to_string(),
        "-f".to_string(),
        file.to_string_lossy().into_owned(),
        "--env-file".to_string(),
        env_file.to_string_lossy().into_owned(),
    ];
    out.extend(direction.verb_args().iter().map(|s| s.to_string()));
    out
}

/// Runs `docker compose` for one file and returns the captured output,
/// whatever the exit code.
pub async fn run_compose<R: CommandRunner>(
    runner: &R,
    file: &Path,
    env_file: &Path,
    direction: ComposeDirection,
) -> Result<CommandOutput> {
    runner
        .capture("docker", &compose_args(file, env_file, direction), None)
        .await
}
