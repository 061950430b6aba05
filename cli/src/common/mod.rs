//! # BeFast Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers (`commands::`). Each
//! submodule wraps one external collaborator or cross-cutting concern:
//!
//! - **`docker`**: `docker network create` / `docker compose` invocations and stderr classification.
//! - **`fs`**: file I/O with context and recursive copy.
//! - **`git`**: template clone and deploy push.
//! - **`network`**: host normalization and the control-plane HTTP client.
//! - **`process`**: the `CommandRunner` seam over child processes.
//! - **`system`**: `DEBUG` token detection, browser opening, cwd name.
//! - **`ui`**: colored terminal output.
//!
//! ```rust
//! use crate::common::{docker, fs::io, process::SystemRunner};
//!
//! io::ensure_file_exists(Path::new(".env"))?;
//! docker::ensure_network(&SystemRunner, docker::SHARED_NETWORK, classify_network_create).await?;
//! ```
//!

/// `docker` CLI wrappers (network, compose, failure classification).
pub mod docker;
/// Filesystem operations (I/O, copy).
pub mod fs;
/// `git` clone and push sequences.
pub mod git;
/// Host normalization and the BeFast HTTP client.
pub mod network;
/// Child-process execution behind the `CommandRunner` trait.
pub mod process;
/// Host environment helpers (debug switch, browser, cwd).
pub mod system;
/// Terminal output helpers.
pub mod ui;
