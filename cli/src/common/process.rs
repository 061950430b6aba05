//! # BeFast Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Every interaction with `docker` and `git` goes through the `CommandRunner`
//! trait defined here. Production code uses `SystemRunner`, a wrapper around
//! `tokio::process::Command`; unit tests substitute a scripted runner so the
//! compose orchestrator and the git helpers can be exercised without a Docker
//! daemon or a network.
//!
//! ## Architecture
//!
//! - **`capture`**: runs a program to completion and returns its exit code,
//!   stdout and stderr. A non-zero exit is *not* an error at this level; the
//!   caller decides (the compose orchestrator classifies stderr, git helpers
//!   call `ensure_success`).
//! - **`stream`**: runs with inherited stdio so the user sees progress
//!   (`git clone`, `git push`). The returned output has empty stdout/stderr.
//! - Spawn failures (program not installed, bad cwd) are the only `Err`s.
//!
//! ```rust
//! let runner = SystemRunner;
//! let out = runner.capture("docker", &args(&["network", "ls"]), None).await?;
//! if !out.success() { println!("{}", out.stderr); }
//! ```
//!
use crate::core::error::{BefastError, Result};
use anyhow::Context;
use std::path::Path;
use std::process::Stdio;
use tracing::{debug, info};

/// Exit code and captured output of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code as text, `?` when killed by a signal.
    pub fn status_label(&self) -> String {
        self.code.map_or_else(|| "?".to_string(), |c| c.to_string())
    }
}

/// Seam over child-process execution.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs `program args...` and captures its output.
    async fn capture(&self, program: &str, args: &[String], cwd: Option<&Path>)
        -> Result<CommandOutput>;

    /// Runs `program args...` with inherited stdio.
    async fn stream(&self, program: &str, args: &[String], cwd: Option<&Path>)
        -> Result<CommandOutput>;
}

/// `CommandRunner` backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(program: &str, args: &[String], cwd: Option<&Path>) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        command
    }
}

impl CommandRunner for SystemRunner {
    async fn capture(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<CommandOutput> {
        debug!("Executing (captured): {} {}", program, args.join(" "));
        let output = Self::command(program, args, cwd)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| {
                format!("Failed to execute command '{}'. Is it installed and in PATH?", program)
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            "'{}' exited with {} (stdout {} bytes, stderr {} bytes)",
            program,
            result.status_label(),
            result.stdout.len(),
            result.stderr.len()
        );
        Ok(result)
    }

    async fn stream(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<CommandOutput> {
        info!("Executing: {} {}", program, args.join(" "));
        let status = Self::command(program, args, cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| {
                format!("Failed to execute command '{}'. Is it installed and in PATH?", program)
            })?;
        Ok(CommandOutput {
            code: status.code(),
            ..Default::default()
        })
    }
}

/// Converts a string-slice argument list into the owned form runners take.
pub fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Turns a non-zero exit into `BefastError::ExternalCommand`.
pub fn ensure_success(program: &str, args: &[String], output: CommandOutput) -> Result<CommandOutput> {
    if output.success() {
        return Ok(output);
    }
    let detail = if output.stderr.trim().is_empty() {
        "Command failed. See terminal output above for details.".to_string()
    } else {
        output.stderr.trim().to_string()
    };
    Err(BefastError::ExternalCommand {
        cmd: format!("{} {}", program, args.join(" ")),
        status: output.status_label(),
        output: detail,
    }
    .into())
}

/// Scripted runner for unit tests: records every call and answers with
/// whatever the responder returns for it.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;

    type Responder = Box<dyn Fn(&str, &[String]) -> CommandOutput>;

    pub struct ScriptedRunner {
        pub calls: RefCell<Vec<(String, Vec<String>)>>,
        responder: Responder,
    }

    impl ScriptedRunner {
        pub fn new(responder: impl Fn(&str, &[String]) -> CommandOutput + 'static) -> Self {
            ScriptedRunner {
                calls: RefCell::new(Vec::new()),
                responder: Box::new(responder),
            }
        }

        /// A runner where every command exits 0 with no output.
        pub fn succeeding() -> Self {
            Self::new(|_, _| ok())
        }

        /// Calls whose first argument equals `first`.
        pub fn calls_starting_with(&self, program: &str, first: &str) -> Vec<Vec<String>> {
            self.calls
                .borrow()
                .iter()
                .filter(|(p, a)| p == program && a.first().map(String::as_str) == Some(first))
                .map(|(_, a)| a.clone())
                .collect()
        }

        fn record(&self, program: &str, args: &[String]) -> CommandOutput {
            self.calls
                .borrow_mut()
                .push((program.to_string(), args.to_vec()));
            (self.responder)(program, args)
        }
    }

    impl CommandRunner for ScriptedRunner {
        async fn capture(
            &self,
            program: &str,
            args: &[String],
            _cwd: Option<&Path>,
        ) -> Result<CommandOutput> {
            Ok(self.record(program, args))
        }

        async fn stream(
            &self,
            program: &str,
            args: &[String],
            _cwd: Option<&Path>,
        ) -> Result<CommandOutput> {
            Ok(self.record(program, args))
        }
    }

    pub fn ok() -> CommandOutput {
        CommandOutput {
            code: Some(0),
            ..Default::default()
        }
    }

    pub fn failed(stderr: &str) -> CommandOutput {
        CommandOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}
