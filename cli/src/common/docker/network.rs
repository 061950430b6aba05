//! # Shared Docker Network
//!
//! File: cli/src/common/docker/network.rs
//!
//! ## Overview
//!
//! All compose stacks started by BeFast join one external bridge network,
//! `befast-compose-shared`, so services in different compose files can reach
//! each other by name. `ensure_network` creates it and treats "already
//! exists" as success, making the call idempotent.
//!
use super::classify::{Classifier, FailureClass};
use crate::common::process::{args, CommandRunner};
use crate::core::error::{BefastError, Result};
use tracing::{debug, info};

/// Name of the network every compose stack attaches to.
pub const SHARED_NETWORK: &str = "befast-compose-shared";

/// What `ensure_network` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Created,
    AlreadyExists,
}

/// Runs `docker network create <name>`, classifying failures with `classify`.
///
/// # Errors
///
/// Any failure the classifier does not deem `Ignorable` is returned as
/// `BefastError::Docker` carrying the daemon's message.
pub async fn ensure_network<R: CommandRunner>(
    runner: &R,
    name: &str,
    classify: Classifier,
) -> Result<NetworkStatus> {
    let output = runner
        .capture("docker", &args(&["network", "create", name]), None)
        .await?;

    if output.success() {
        info!("Created docker network '{}'", name);
        return Ok(NetworkStatus::Created);
    }

    match classify(&output.stderr) {
        FailureClass::Ignorable => {
            debug!("Docker network '{}' already exists", name);
            Ok(NetworkStatus::AlreadyExists)
        }
        FailureClass::Hint(hint) => Err(BefastError::Docker(format!(
            "Failed to create network '{}': {}\n{}",
            name,
            output.stderr.trim(),
            hint
        ))
        .into()),
        FailureClass::Fatal => Err(BefastError::Docker(format!(
            "Failed to create network '{}': {}",
            name,
            output.stderr.trim()
        ))
        .into()),
    }
}
