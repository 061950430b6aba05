//! # BeFast Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per top-level `befast` command. Each exposes a clap `Args`
//! struct (where the command takes arguments) and an async `handle_*`
//! function that receives the parsed arguments and the `AppConfig` built in
//! `main.rs`.
//!
//! ## Commands
//!
//! - `compose`: `docker compose up|down` over every file in `./compose/`
//! - `deploy`: push the current directory to the configured host
//! - `domains`: attach custom domains to deployed projects
//! - `dotenv`: reconcile `./.env` with `./.env.example`
//! - `init`: scaffold a project from the template repository
//! - `login`: obtain and store an API key for a host
//! - `meta`: `version` and `cwd`
//!

pub mod compose;
pub mod deploy;
pub mod domains;
/// Backs both `befast dotenv_example` and the first step of `befast compose`.
pub mod dotenv;
pub mod init;
pub mod login;
pub mod meta;
