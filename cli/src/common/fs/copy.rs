//! # BeFast Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Recursive directory copy used by `befast init` to materialize
//! `examples/<name>` from the cloned template repository into `./<name>`.
//! The heavy lifting is done by `fs_extra`; this module only fixes the copy
//! options and wraps errors with context.
//!
//! ```rust
//! use crate::common::fs::copy;
//! use std::path::Path;
//!
//! copy::copy_directory_contents(Path::new("/tmp/clone/examples/demo"), Path::new("./demo"))?;
//! ```
//!
use crate::core::error::{BefastError, Result};
use std::path::Path;
use tracing::info;

/// Copies the *contents* of `source` into `target`, creating `target`.
///
/// `target` must not exist yet and its parent must; existing files are never
/// overwritten.
///
/// # Errors
///
/// Returns an `Err` if `target` already exists, `source` is not a directory,
/// or any file fails to copy.
pub fn copy_directory_contents(source: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        anyhow::bail!(BefastError::FileSystem(format!(
            "Target already exists: {:?}",
            target
        )));
    }
    if !source.is_dir() {
        anyhow::bail!(BefastError::FileSystem(format!(
            "Source is not a directory: {:?}",
            source
        )));
    }
    info!("Copying {:?} to {:?}", source, target);

    let mut options = fs_extra::dir::CopyOptions::new();
    options.content_only = true;
    options.overwrite = false;

    let bytes = fs_extra::dir::copy(source, target, &options).map_err(|e| {
        anyhow::anyhow!(e).context(format!("Failed to copy dir {:?} to {:?}", source, target))
    })?;

    info!("Copied {} bytes into {:?}", bytes, target);
    Ok(())
}
