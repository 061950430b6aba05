//! # BeFast Informational Commands
//!
//! File: cli/src/commands/meta.rs
//!
//! `befast version` (alias `v`) prints the crate version; `befast cwd` prints
//! the directory BeFast resolves `.env`, `.env.example` and `compose/` against.
//!
use crate::core::error::Result;
use anyhow::Context;

/// Version printed by `befast version`.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn handle_version() -> Result<()> {
    println!("{}", version());
    Ok(())
}

pub fn handle_cwd() -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    println!("{}", cwd.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
        assert!(version().split('.').count() >= 3);
    }
}
