//! # BeFast Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the BeFast CLI. Command
//! handlers return `anyhow::Result`, and wrap a `BefastError` whenever the
//! failure belongs to one of the categories `main` reports differently:
//!
//! - **Usage errors** (a required argument is missing): printed as a red
//!   message followed by the correct invocation in cyan.
//! - **Remote errors** (the BeFast host answered with a non-success status):
//!   printed with setup guidance.
//! - **Subprocess errors** (`docker`, `git` exited non-zero).
//! - **Cancellation** (Ctrl-C during the login poll loop).
//!
//! Every variant ends the CLI invocation with exit code 1.
//!
//! ## Examples
//!
//! ```rust
//! // Return a usage error with the correct invocation as a hint
//! return Err(BefastError::usage("Missing host", "befast login [host]").into());
//!
//! // Add context to I/O failures using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the BeFast application.
#[derive(Error, Debug)]
pub enum BefastError {
    #[error("{message}. Run {hint}")]
    Usage { message: String, hint: String },

    #[error("{0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Docker error: {0}")]
    Docker(String),

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("{0} cancelled.")]
    Cancelled(String),
}

impl BefastError {
    /// Shorthand for a `Usage` error: `message` says what is wrong, `hint` is
    /// the invocation the user should run instead.
    pub fn usage(message: impl Into<String>, hint: impl Into<String>) -> Self {
        BefastError::Usage {
            message: message.into(),
            hint: hint.into(),
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let usage = BefastError::usage("Missing host", "befast login [host]");
        assert_eq!(usage.to_string(), "Missing host. Run befast login [host]");

        let config_err = BefastError::Config("apikey is empty".to_string());
        assert_eq!(config_err.to_string(), "Configuration error: apikey is empty");

        let cancelled = BefastError::Cancelled("Login".into());
        assert_eq!(cancelled.to_string(), "Login cancelled.");

        let ext = BefastError::ExternalCommand {
            cmd: "git push".into(),
            status: "128".into(),
            output: "fatal: repository not found".into(),
        };
        assert!(ext.to_string().contains("git push"));
        assert!(ext.to_string().contains("128"));
    }

    #[test]
    fn test_usage_error_survives_anyhow_downcast() {
        let err: anyhow::Error = BefastError::usage("missing domain", "befast domains add").into();
        assert!(matches!(
            err.downcast_ref::<BefastError>(),
            Some(BefastError::Usage { .. })
        ));
    }
}
