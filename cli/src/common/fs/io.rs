//! # BeFast Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach the offending path to every
//! error. Used by the env reconciler (`.env` / `.env.example`), the config
//! store and the compose file discovery.
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`ensure_file_exists`**: creates an empty file (and its parents) when absent;
//!   never truncates an existing one.
//! - **`read_file_to_string`** / **`write_string_to_file`**: read and overwrite with context.
//!
//! ```rust
//! use crate::common::fs::io;
//! use std::path::Path;
//!
//! io::ensure_file_exists(Path::new(".env"))?;
//! let content = io::read_file_to_string(Path::new(".env"))?;
//! io::write_string_to_file(Path::new(".env"), &content)?;
//! ```
//!
use crate::core::error::{BefastError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path, creating it and any
/// missing parents.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(BefastError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Ensures a regular file exists at `path`. Missing files are created empty
/// (parents included); existing files are left untouched.
///
/// # Errors
///
/// Returns an `Err` if the path is a directory or the file cannot be created.
pub fn ensure_file_exists(path: &Path) -> Result<()> {
    if path.is_dir() {
        anyhow::bail!(BefastError::FileSystem(format!(
            "Expected a file but found a directory: {:?}",
            path
        )));
    }
    if path.exists() {
        debug!("File already exists: {:?}", path);
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::File::create(path).with_context(|| format!("Failed to create file {:?}", path))?;
    info!("Created empty file: {:?}", path);
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a file, overwriting it. The parent directory is
/// created first if needed.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    // A bare file name has an empty parent; nothing to create then.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_ensure_file_exists_creates_empty_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("deep/.env");
        ensure_file_exists(&file_path)?;
        assert!(file_path.is_file());
        assert_eq!(fs::read_to_string(&file_path)?, "");
        Ok(())
    }

    /// An existing file must keep its content.
    #[test]
    fn test_ensure_file_exists_keeps_content() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join(".env");
        fs::write(&file_path, "A=1")?;
        ensure_file_exists(&file_path)?;
        assert_eq!(fs::read_to_string(&file_path)?, "A=1");
        Ok(())
    }

    #[test]
    fn test_ensure_file_exists_rejects_directory() -> Result<()> {
        let base_dir = tempdir()?;
        assert!(ensure_file_exists(base_dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_read_write_string_to_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("out/test_rw.txt");
        write_string_to_file(&file_path, "Hello, BeFast!")?;
        assert_eq!(read_file_to_string(&file_path)?, "Hello, BeFast!");
        Ok(())
    }

    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let base_dir = tempdir()?;
        let result = read_file_to_string(&base_dir.path().join("nonexistent.txt"));
        assert!(result.is_err());
        Ok(())
    }
}
