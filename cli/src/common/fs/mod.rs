//! # BeFast Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! - **`copy`**: recursive copy of a template example into a new project directory (`fs_extra`).
//! - **`io`**: ensure-dir / ensure-file, read and write with path context.
//!
//! Import the submodule you need, e.g. `use crate::common::fs::io;`.
//!

/// Recursive directory copy (`copy_directory_contents`).
pub mod copy;
/// Basic file I/O (`ensure_file_exists`, `read_file_to_string`, `write_string_to_file`).
pub mod io;
