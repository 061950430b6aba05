//! # BeFast Compose Orchestrator
//!
//! File: cli/src/commands/compose.rs
//!
//! ## Overview
//!
//! This module implements `befast compose [up|down]`: every `*.yml` / `*.yaml`
//! file in `./compose/` is handed to `docker compose`, one after another, with
//! `./.env` as the env file. All stacks share the external network
//! `befast-compose-shared`.
//!
//! ## Architecture
//!
//! 1. `.env` is reconciled against `.env.example` first.
//! 2. The compose file set is listed fresh from the directory, filtered by
//!    extension and **sorted by file name** so runs are reproducible.
//! 3. The shared network is created once, before any compose call. "Already
//!    exists" is success; any other failure aborts the whole run.
//! 4. Files are processed strictly sequentially. A failing file never stops
//!    the remaining ones: its stderr is printed and, for a port conflict, a
//!    remediation hint follows.
//! 5. A `ComposeReport` lists which files succeeded and failed. The command
//!    is best-effort and exits 0 unless `--strict` is given.
//!
//! ## Usage
//!
//! ```bash
//! befast compose          # up -d --wait for every file
//! befast compose down     # tear every stack down
//! befast compose --strict # exit 1 if any file failed
//! ```
//!
use crate::commands::dotenv;
use crate::common::docker::{
    self,
    classify::{self, Classifier, FailureClass},
    ComposeDirection,
};
use crate::common::process::{CommandRunner, SystemRunner};
use crate::common::ui;
use crate::core::config::AppConfig;
use crate::core::error::{BefastError, Result};
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing::{debug, info};

/// # Compose Arguments (`ComposeArgs`)
#[derive(Parser, Debug)]
#[command(about = "Run docker compose for every file in ./compose")]
pub struct ComposeArgs {
    /// `up` starts every stack detached and waits for health checks; `down` removes them.
    #[arg(value_enum, default_value_t = ComposeDirection::Up)]
    direction: ComposeDirection,

    /// Exit with status 1 when any compose file failed.
    #[arg(long)]
    strict: bool,
}

/// Per-file outcome of one orchestration run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ComposeReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

impl ComposeReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Stderr classifiers used for the network step and for each compose call.
#[derive(Debug, Clone, Copy)]
pub struct Classifiers {
    pub network: Classifier,
    pub compose: Classifier,
}

impl Default for Classifiers {
    fn default() -> Self {
        Classifiers {
            network: classify::classify_network_create,
            compose: classify::classify_compose,
        }
    }
}

/// Handler for `befast compose`.
pub async fn handle_compose(args: ComposeArgs, cfg: &AppConfig) -> Result<()> {
    info!("Handling compose command...");
    debug!("Compose args: {:?}", args);

    let outcome = dotenv::reconcile(&cfg.env_file, &cfg.env_example)?;
    dotenv::report(&outcome, &cfg.env_file);

    let report = orchestrate(
        &SystemRunner,
        &cfg.compose_dir,
        &cfg.env_file,
        args.direction,
        Classifiers::default(),
    )
    .await?;

    ui::blank();
    if report.all_succeeded() {
        ui::success(&format!("{} compose file(s) done.", report.succeeded.len()));
        return Ok(());
    }

    ui::plain(&format!(
        "{} succeeded, {} failed: {}",
        report.succeeded.len(),
        report.failed.len(),
        report.failed.join(", ")
    ));
    if args.strict {
        return Err(BefastError::Docker(format!(
            "{} compose file(s) failed",
            report.failed.len()
        ))
        .into());
    }
    Ok(())
}

/// Names of the compose files in `dir`, sorted.
///
/// # Errors
///
/// Returns an `Err` if `dir` is missing or cannot be listed.
pub fn discover_compose_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(BefastError::FileSystem(format!(
            "No compose directory found at {}",
            dir.display()
        ))
        .into());
    }
    let mut files = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_compose_file(&name) {
            files.push(name);
        } else {
            debug!("Skipping non-compose entry: {}", name);
        }
    }
    files.sort();
    Ok(files)
}

fn is_compose_file(name: &str) -> bool {
    name.ends_with(".yml") || name.ends_with(".yaml")
}

/// Brings every compose stack in `compose_dir` up or down on the shared network.
///
/// The file list is read fresh from disk. When it is empty nothing else
/// happens; otherwise `befast-compose-shared` is created (or found) before the
/// first `docker compose` call, and the files are then processed one at a time.
///
/// # Arguments
///
/// * `runner` - Executes the `docker` calls (`SystemRunner` outside tests).
/// * `compose_dir` - Directory holding the `*.yml` / `*.yaml` files.
/// * `env_file` - Passed to every call as `--env-file`.
/// * `direction` - `Up` (`up -d --wait`) or `Down` (`down`).
/// * `classifiers` - Stderr classifiers for the network step and compose calls.
///
/// # Returns
///
/// * `Result<ComposeReport>` - Which files succeeded and which failed. A failed
///   file is printed (with a remediation hint when the classifier has one) and
///   does not stop the remaining files.
///
/// # Errors
///
/// Returns an `Err` if:
/// - `compose_dir` is missing or cannot be listed.
/// - Creating the network fails with anything other than "already exists".
pub async fn orchestrate<R: CommandRunner>(
    runner: &R,
    compose_dir: &Path,
    env_file: &Path,
    direction: ComposeDirection,
    classifiers: Classifiers,
) -> Result<ComposeReport> {
    let files = discover_compose_files(compose_dir)?;
    info!("Compose files: {:?}", files);
    if files.is_empty() {
        debug!("No compose files in {}", compose_dir.display());
        ui::muted(&format!("No compose files found in {}", compose_dir.display()));
        return Ok(ComposeReport::default());
    }

    docker::ensure_network(runner, docker::SHARED_NETWORK, classifiers.network).await?;

    let mut report = ComposeReport::default();
    for name in files {
        let path = compose_dir.join(&name);
        // Spawn errors (docker not installed) are per-file failures too.
        ui::emphasis(&format!("{} ({})", path.display(), direction));

        match docker::run_compose(runner, &path, env_file, direction).await {
            Ok(output) if output.success() => {
                ui::success(&name);
                report.succeeded.push(name);
            }
            Ok(output) => {
                debug!("docker compose failed for {} ({})", name, output.status_label());
                ui::error(&format!("docker compose failed for {}", name));
                ui::failure_output(&output.stderr);
                if let FailureClass::Hint(hint) = (classifiers.compose)(&output.stderr) {
                    ui::hint(hint);
                }
                report.failed.push(name);
            }
            Err(e) => {
                debug!("Could not run docker compose for {}: {:?}", name, e);
                ui::error(&format!("{:#}", e));
                report.failed.push(name);
            }
        }
    }
    Ok(report)
}
