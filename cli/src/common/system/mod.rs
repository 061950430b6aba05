//! # BeFast System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Small interactions with the host environment:
//!
//! - **Debug switch**: `DEBUG` holds a comma-separated list of tokens (the
//!   convention shared with other tools reading the same variable); BeFast
//!   enables verbose logging when `befast` is one of them.
//! - **Browser**: `open_in_browser` hands a URL to the desktop's default
//!   handler. Failures are logged and swallowed since the URL has already
//!   been printed for the user to open manually.
//! - **Working directory**: `current_dir_name` derives a default project name.
//!
use crate::core::error::{BefastError, Result};
use anyhow::Context;
use tracing::debug;

/// Environment variable carrying debug tokens.
pub const DEBUG_ENV: &str = "DEBUG";
/// Token in `DEBUG` that enables BeFast's debug output.
pub const DEBUG_TOKEN: &str = "befast";

/// True when `value` (a comma-separated list) contains `DEBUG_TOKEN`.
pub fn debug_enabled(value: &str) -> bool {
    value.split(',').any(|token| token.trim() == DEBUG_TOKEN)
}

/// Reads `DEBUG` from the process environment.
pub fn debug_from_env() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|v| debug_enabled(&v))
        .unwrap_or(false)
}

/// Opens `url` in the default browser, ignoring failures.
pub fn open_in_browser(url: &str) {
    match open::that(url) {
        Ok(()) => debug!("Opened {} in browser", url),
        Err(e) => debug!("Could not open browser for {}: {}", url, e),
    }
}

/// Last component of the current working directory.
pub fn current_dir_name() -> Result<String> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    cwd.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BefastError::FileSystem(format!("Cannot derive a name from {}", cwd.display())).into()
        })
}
