//! # BeFast Env File Reconciler
//!
//! File: cli/src/commands/dotenv.rs
//!
//! ## Overview
//!
//! This module implements `befast dotenv_example`, which keeps `./.env` in
//! step with `./.env.example`. The compose command runs the same routine
//! before starting any stack.
//!
//! ## Architecture
//!
//! 1. Both files are created empty when absent.
//! 2. `.env` is split on `\n` into `current`; nothing in it is ever removed,
//!    reordered or deduplicated.
//! 3. Template lines that are comments (`#` after trimming) or have no `=`
//!    are ignored. For the rest, the key is everything before the first `=`.
//! 4. A template line is missing when no line of `current` starts with `key=`.
//! 5. Missing lines are appended, in template order, below the marker
//!    `# BeFast added missed variables:`; nothing is appended when none are
//!    missing. The result is joined with `\n` and written back.
//!
//! Appended lines satisfy their own key on the next run, so the operation is
//! idempotent.
//!
//! ## Usage
//!
//! ```bash
//! befast dotenv_example
//! ```
//!
use crate::common::{fs::io, ui};
use crate::core::config::AppConfig;
use crate::core::error::Result;
use std::path::Path;
use tracing::{debug, info};

/// Comment line placed above appended variables.
pub const MISSING_MARKER: &str = "# BeFast added missed variables:";

/// Result of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Template lines that were appended, in template order.
    pub added: Vec<String>,
}

/// Handler for `befast dotenv_example`.
pub async fn handle_dotenv(cfg: &AppConfig) -> Result<()> {
    info!("Handling dotenv_example command...");
    let outcome = reconcile(&cfg.env_file, &cfg.env_example)?;
    report(&outcome, &cfg.env_file);
    Ok(())
}

/// Prints what a reconciliation changed.
pub fn report(outcome: &ReconcileOutcome, env_file: &Path) {
    if outcome.added.is_empty() {
        ui::muted(&format!("{} is up to date.", env_file.display()));
    } else {
        ui::success(&format!(
            "Added {} missing variable(s) to {}",
            outcome.added.len(),
            env_file.display()
        ));
    }
}

/// Reconciles the env file at `env_path` against `template_path`,
/// overwriting `env_path`.
///
/// Both files are created empty when absent, so a fresh checkout ends up with
/// an (empty) `.env` instead of an error. The env file is always rewritten,
/// even when nothing was added; its content is unchanged in that case.
///
/// # Arguments
///
/// * `env_path` - The `.env` file to complete. Existing lines are kept verbatim.
/// * `template_path` - The `.env.example` file listing the required keys.
///
/// # Returns
///
/// * `Result<ReconcileOutcome>` - The template lines that were appended.
///
/// # Errors
///
/// Returns an `Err` if either path is a directory, or if creating, reading or
/// writing either file fails.
pub fn reconcile(env_path: &Path, template_path: &Path) -> Result<ReconcileOutcome> {
    io::ensure_file_exists(env_path)?;
    io::ensure_file_exists(template_path)?;

    let env_content = io::read_file_to_string(env_path)?;
    let template_content = io::read_file_to_string(template_path)?;

    let current = split_lines(&env_content);
    let template = split_lines(&template_content);

    let added = missing_lines(&current, &template);
    let merged = reconcile_lines(current, &template);

    io::write_string_to_file(env_path, &merged.join("\n"))?;
    debug!(
        "Reconciled {} against {}: {} added",
        env_path.display(),
        template_path.display(),
        added.len()
    );
    Ok(ReconcileOutcome { added })
}

/// `current` with every missing template line appended under the marker.
pub fn reconcile_lines(mut current: Vec<String>, template: &[String]) -> Vec<String> {
    let missing = missing_lines(&current, template);
    if !missing.is_empty() {
        current.push(MISSING_MARKER.to_string());
        current.extend(missing);
    }
    current
}

/// Template lines whose key has no `key=` line in `current`.
pub fn missing_lines(current: &[String], template: &[String]) -> Vec<String> {
    template
        .iter()
        .filter_map(|line| required_key(line).map(|key| (key, line)))
        .filter(|(key, _)| {
            let prefix = format!("{}=", key);
            !current.iter().any(|existing| existing.starts_with(&prefix))
        })
        .map(|(_, line)| line.clone())
        .collect()
}

/// Key of a template line, or `None` for comments and lines without `=`.
fn required_key(line: &str) -> Option<&str> {
    if line.trim_start().starts_with('#') {
        return None;
    }
    line.split_once('=').map(|(key, _)| key)
}

fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}
