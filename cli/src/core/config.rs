//! # BeFast Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module owns the BeFast config store and the `AppConfig` value handed to
//! every command handler. The store is a small TOML file holding the host the
//! user logged in to and the API key issued for it:
//!
//! ```toml
//! host = "befast.example.com"
//! apikey = "c0ffee..."
//! # optional, used by `befast init`
//! template_repo = "https://github.com/acme/befast-templates.git"
//! ```
//!
//! ## Architecture
//!
//! - The file location is `<platform config dir>/befast/config.toml`, unless
//!   `--config` / `BEFAST_CONFIG` points elsewhere (`~` is expanded).
//! - `load_config` reads the file once per invocation; a missing file yields
//!   empty credentials. Handlers receive `&AppConfig` and never touch the file
//!   themselves, except `login` which persists through `save_credentials`.
//! - `save_credentials` merges into whatever the file already holds, so keys
//!   other than `host` and `apikey` survive a re-login.
//!
//! ## Examples
//!
//! ```rust
//! let path = config::resolve_config_path(cli.config.as_deref())?;
//! let cfg = config::load_config(&path, debug)?;
//! let creds = cfg.require_host()?; // usage error when not logged in
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{BefastError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory (relative to the working directory) scanned for compose files.
pub const COMPOSE_DIR: &str = "compose";
/// The env file every compose stack is started with.
pub const ENV_FILE: &str = ".env";
/// The template the env file is reconciled against.
pub const ENV_EXAMPLE_FILE: &str = ".env.example";
/// Repository `befast init` clones examples from when the config names none.
pub const DEFAULT_TEMPLATE_REPO: &str = "https://github.com/befast-dev/befast.git";

const CONFIG_FILENAME: &str = "config.toml";

/// Host + API key as persisted by `befast login`. Both may be empty.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Credentials {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub apikey: String,
}

/// On-disk shape of the config store.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub apikey: String,
    /// Git URL of the repository holding `examples/<name>` templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_repo: Option<String>,
}

/// Everything a command handler needs, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub credentials: Credentials,
    pub template_repo: String,
    /// `DEBUG` contained the `befast` token.
    pub debug: bool,
    pub compose_dir: PathBuf,
    pub env_file: PathBuf,
    pub env_example: PathBuf,
}

impl AppConfig {
    /// Builds a config rooted at the current working directory from an
    /// already-parsed `ConfigFile`.
    pub fn from_file(config_path: PathBuf, file: ConfigFile, debug: bool) -> Self {
        AppConfig {
            config_path,
            credentials: Credentials {
                host: file.host,
                apikey: file.apikey,
            },
            template_repo: file
                .template_repo
                .unwrap_or_else(|| DEFAULT_TEMPLATE_REPO.to_string()),
            debug,
            compose_dir: PathBuf::from(COMPOSE_DIR),
            env_file: PathBuf::from(ENV_FILE),
            env_example: PathBuf::from(ENV_EXAMPLE_FILE),
        }
    }

    /// Returns the stored credentials, or a usage error pointing at
    /// `befast login` when no host has been configured yet.
    pub fn require_host(&self) -> Result<&Credentials> {
        if self.credentials.host.is_empty() {
            return Err(BefastError::usage("Missing host", "befast login [host]").into());
        }
        debug!("host configured: {}", self.credentials.host);
        Ok(&self.credentials)
    }
}

/// Resolves the config file location: an explicit override (tilde-expanded)
/// or the platform config directory.
pub fn resolve_config_path(override_path: Option<&str>) -> Result<PathBuf> {
    if let Some(raw) = override_path {
        let expanded = shellexpand::tilde(raw).into_owned();
        debug!("Using config path override: {}", expanded);
        return Ok(PathBuf::from(expanded));
    }
    let proj_dirs = ProjectDirs::from("dev", "BeFast", "befast").ok_or_else(|| {
        BefastError::Config("Could not determine user config directory.".to_string())
    })?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads the config store at `path` and builds the `AppConfig`.
pub fn load_config(path: &Path, debug: bool) -> Result<AppConfig> {
    let file = read_config_file(path)?;
    let cfg = AppConfig::from_file(path.to_path_buf(), file, debug);
    debug!(
        "Loaded configuration from {} (host: {:?}, apikey set: {})",
        cfg.config_path.display(),
        cfg.credentials.host,
        !cfg.credentials.apikey.is_empty()
    );
    Ok(cfg)
}

/// Builds the `AppConfig` for commands that only work on the current
/// directory (`dotenv_example`, `compose`). These never read the credentials,
/// so a config store that cannot be located or parsed is reported with a
/// warning and replaced by an empty one.
pub fn load_local_config(override_path: Option<&str>, debug: bool) -> AppConfig {
    let loaded = resolve_config_path(override_path).and_then(|path| load_config(&path, debug));
    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Ignoring unreadable configuration: {:#}", e);
            AppConfig::from_file(
                PathBuf::from(override_path.unwrap_or_default()),
                ConfigFile::default(),
                debug,
            )
        }
    }
}

/// Reads the config store; an absent file is an empty config.
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        debug!("Config file not found at {}", path.display());
        return Ok(ConfigFile::default());
    }
    let content = io::read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Writes `credentials` into the config store, keeping any other keys.
pub fn save_credentials(path: &Path, credentials: &Credentials) -> Result<()> {
    let mut file = read_config_file(path)?;
    file.host = credentials.host.clone();
    file.apikey = credentials.apikey.clone();
    let content = toml::to_string(&file).context("Failed to serialize configuration")?;
    io::write_string_to_file(path, &content)?;
    info!("Saved credentials for {} to {}", file.host, path.display());
    Ok(())
}
