//! # BeFast Docker Utilities (`common::docker`)
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! BeFast drives the `docker` CLI as a subprocess (through
//! `common::process::CommandRunner`) rather than talking to the Engine API:
//! compose files are handed to `docker compose` unparsed, and the only other
//! daemon state touched is the shared network.
//!
//! ## Architecture
//!
//! - **`classify`**: maps stderr of a failed call to `Ignorable` / `Hint` / `Fatal`.
//! - **`network`**: idempotent creation of `befast-compose-shared`.
//! - **`compose`**: argument building and execution of one `docker compose` call.
//!
//! ```rust
//! use crate::common::docker::{self, classify, ComposeDirection};
//!
//! docker::ensure_network(&runner, docker::SHARED_NETWORK, classify::classify_network_create).await?;
//! let out = docker::run_compose(&runner, file, env_file, ComposeDirection::Up).await?;
//! ```
//!

/// Failure classification for `docker` stderr.
pub mod classify;
/// `docker compose` invocation for a single file.
pub mod compose;
/// Shared network creation.
pub mod network;

pub use compose::{run_compose, ComposeDirection};
pub use network::{ensure_network, SHARED_NETWORK};
