//! # BeFast UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! User-facing terminal output. Logs go through `tracing` to stderr; what the
//! user is meant to read goes through these helpers. Colors come from
//! `colored`, which honors `NO_COLOR` / `CLICOLOR` / `CLICOLOR_FORCE`.
//!
//! | Helper | Style | Used for |
//! |---|---|---|
//! | `muted` | gray | progress, codes, URLs after deploy |
//! | `emphasis` | cyan bold | URLs and commands the user should act on |
//! | `success` | green check | finished steps |
//! | `hint` | yellow | remediation advice |
//! | `usage_error` | red + cyan bold | missing arguments |
//! | `error` | red bold prefix | every other failure |
//!
use colored::Colorize;
use std::fmt::Display;

pub fn muted(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().bright_black());
}

pub fn emphasis(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// A list entry the user can pick (example names).
pub fn choice(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().green().bold());
}

pub fn plain(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}

pub fn blank() {
    println!();
}

/// Printed to stdout so it stays next to the failing command's output.
pub fn hint(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "hint:".yellow().bold(), msg.to_string().yellow());
}

/// Raw stderr of a failed subprocess, indented.
pub fn failure_output(output: &str) {
    for line in output.trim_end().lines() {
        eprintln!("  {}", line.red());
    }
}

/// Missing-argument message followed by the correct invocation.
pub fn usage_error(message: &str, invocation: &str) {
    eprintln!("{} {}", message.red(), invocation.cyan().bold());
}

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}
