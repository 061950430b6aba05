//! # BeFast Init Handler
//!
//! File: cli/src/commands/init.rs
//!
//! ## Overview
//!
//! `befast init <name>` scaffolds a new project from one of the examples
//! shipped in the BeFast template repository.
//!
//! ## Architecture
//!
//! 1. Checks that a host is configured and that `./<name>` does not exist.
//! 2. Shallow-clones the template repository (`template_repo` in the config
//!    file, BeFast's public repository otherwise) into a temporary directory.
//! 3. Copies `examples/<name>` from the clone to `./<name>`.
//! 4. Prints the commands that deploy the new project.
//!
//! The temporary clone is removed when the handler returns.
//!
use crate::common::fs::copy;
use crate::common::git;
use crate::common::process::{CommandRunner, SystemRunner};
use crate::common::ui;
use crate::core::config::AppConfig;
use crate::core::error::{BefastError, Result};
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Examples listed when no name is given.
pub const KNOWN_EXAMPLES: &[&str] = &["demo", "static"];

/// Directory inside the template repository holding the examples.
const EXAMPLES_DIR: &str = "examples";

/// # Init Arguments (`InitArgs`)
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Example to scaffold, e.g. `demo`.
    pub name: Option<String>,
}

/// Handler for `befast init`.
pub async fn handle_init(args: InitArgs, cfg: &AppConfig) -> Result<()> {
    info!("Handling init command...");
    debug!("Init args: {:?}", args);

    let Some(name) = args.name.filter(|n| !n.trim().is_empty()) else {
        ui::muted("Choose one of:");
        for example in KNOWN_EXAMPLES {
            ui::choice(example);
        }
        return Err(BefastError::usage("Missing example", "befast init [name]").into());
    };
    cfg.require_host()?;

    let target = PathBuf::from(&name);
    scaffold(&SystemRunner, &cfg.template_repo, &name, &target).await?;

    ui::success(&format!("Created {}", target.display()));
    ui::blank();
    ui::muted("Next steps:");
    ui::plain(&format!("  cd {}", name));
    ui::plain("  befast deploy [rename]");
    Ok(())
}

/// Clones `template_repo` and copies its `examples/<name>` to `target`.
pub async fn scaffold<R: CommandRunner>(
    runner: &R,
    template_repo: &str,
    name: &str,
    target: &Path,
) -> Result<()> {
    if target.exists() {
        return Err(BefastError::FileSystem(format!(
            "{} already exists. Choose another directory or remove it first.",
            target.display()
        ))
        .into());
    }

    let scratch = tempfile::tempdir().context("Failed to create temporary directory")?;
    let checkout = scratch.path().join("template");
    git::clone_shallow(runner, template_repo, &checkout).await?;

    copy_example(&checkout, name, target)
}

/// Copies `examples/<name>` out of a template checkout.
fn copy_example(checkout: &Path, name: &str, target: &Path) -> Result<()> {
    let source = checkout.join(EXAMPLES_DIR).join(name);
    if !source.is_dir() {
        let available = available_examples(&checkout.join(EXAMPLES_DIR))?;
        return Err(BefastError::Config(format!(
            "Unknown example '{}'. Available: {}",
            name,
            if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            }
        ))
        .into());
    }
    debug!("Copying {} to {}", source.display(), target.display());
    copy::copy_directory_contents(&source, target)
}

/// Sorted directory names under `examples_dir`; empty when it is missing.
fn available_examples(examples_dir: &Path) -> Result<Vec<String>> {
    if !examples_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(examples_dir)
        .with_context(|| format!("Failed to read {}", examples_dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
