//! # Docker Failure Classification
//!
//! File: cli/src/common/docker/classify.rs
//!
//! ## Overview
//!
//! The Docker CLI reports failures only as exit codes plus free-form stderr.
//! BeFast reacts to two specific messages:
//!
//! - `docker network create` for a network that is already there. This is
//!   the normal case on every run after the first, so it is **ignorable**.
//! - `docker compose up` when a host port is taken by another container. The
//!   user gets a **hint** on how to free it.
//!
//! Everything else is **fatal** for the step that produced it (what that means
//! for the run as a whole is decided by the caller).
//!
//! Classifiers are plain `fn(&str) -> FailureClass`, so callers (and tests)
//! can swap them. The matched text is daemon output and may drift between
//! Docker releases; keep the literals here and nowhere else.
//!

/// Outcome of classifying a failed Docker invocation's stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Expected failure that means the desired state already holds.
    Ignorable,
    /// Known failure with a remediation message for the user.
    Hint(&'static str),
    /// Anything not recognized.
    Fatal,
}

/// Maps raw stderr text to a `FailureClass`.
pub type Classifier = fn(&str) -> FailureClass;

/// Start of the daemon's reply when a network name is taken.
pub const NETWORK_EXISTS_PREFIX: &str = "Error response from daemon: network with name";

/// Substring docker prints when a published port is in use.
pub const PORT_ALLOCATED: &str = "port is already allocated";

pub const PORT_ALLOCATED_HINT: &str = "A port needed by this stack is already in use. \
If you started it before, run `befast compose down` first, or stop the conflicting \
container manually (`docker ps` shows which one publishes the port).";

/// Classifier for `docker network create`.
pub fn classify_network_create(stderr: &str) -> FailureClass {
    let trimmed = stderr.trim_start();
    if trimmed.starts_with(NETWORK_EXISTS_PREFIX) && trimmed.contains("already exists") {
        FailureClass::Ignorable
    } else {
        FailureClass::Fatal
    }
}

/// Classifier for `docker compose ...`.
pub fn classify_compose(stderr: &str) -> FailureClass {
    if stderr.contains(PORT_ALLOCATED) {
        FailureClass::Hint(PORT_ALLOCATED_HINT)
    } else {
        FailureClass::Fatal
    }
}
