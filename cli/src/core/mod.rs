//! # BeFast Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: the `{host, apikey}` config store and the `AppConfig` passed to handlers
//! - `error`: `BefastError` and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::config::AppConfig;
//! use crate::core::error::{BefastError, Result};
//! ```
//!
pub mod config;
pub mod error;
