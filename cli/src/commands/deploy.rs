//! # BeFast Deploy Handler
//!
//! File: cli/src/commands/deploy.rs
//!
//! ## Overview
//!
//! `befast deploy [name]` publishes the current directory:
//!
//! 1. `POST /api/deploy` with `{host, name}` asks the host for a GitHub
//!    repository (`owner/repo`) and the domain the app will be served on.
//! 2. The working tree is committed and force-pushed to `main` of that
//!    repository, which the host builds from.
//! 3. The repository, dashboard and app URLs are printed and the dashboard is
//!    opened in the browser.
//!
//! `name` defaults to the name of the current directory.
//!
//! ## Usage
//!
//! ```bash
//! befast deploy          # deploy as "<current dir name>"
//! befast deploy shop     # deploy under another name
//! ```
//!
use crate::common::git;
use crate::common::network::http::{ApiClient, DeployTarget};
use crate::common::process::SystemRunner;
use crate::common::{system, ui};
use crate::core::config::AppConfig;
use crate::core::error::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{debug, info};

/// # Deploy Arguments (`DeployArgs`)
#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Deploy name; defaults to the current directory's name.
    pub name: Option<String>,
}

/// URLs shown after a successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployLinks {
    pub repository: String,
    pub dashboard: String,
    pub app: String,
}

impl DeployLinks {
    pub fn new(origin: &str, target: &DeployTarget) -> Self {
        DeployLinks {
            repository: format!("https://github.com/{}/{}", target.owner, target.repo),
            dashboard: format!("{}/{}", origin, target.repo),
            app: format!("https://{}", target.domain),
        }
    }
}

/// Handler for `befast deploy`.
pub async fn handle_deploy(args: DeployArgs, cfg: &AppConfig) -> Result<()> {
    info!("Handling deploy command...");
    debug!("Deploy args: {:?}", args);

    let creds = cfg.require_host()?;
    let name = match args.name.filter(|n| !n.trim().is_empty()) {
        Some(name) => name,
        None => system::current_dir_name()?,
    };

    let client = ApiClient::new(&creds.host)?.with_apikey(&creds.apikey);
    ui::muted(&format!("Deploying {} to {}...", name, creds.host));
    let target = client.deploy(&name).await?;

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    git::push_for_deploy(
        &SystemRunner,
        &cwd,
        &target.owner,
        &target.repo,
        &commit_message(Utc::now()),
    )
    .await?;

    let links = DeployLinks::new(&client.origin(), &target);
    ui::success(&format!("{} deployed.", name));
    ui::plain(&format!("Repository: {}", links.repository));
    ui::plain(&format!("Dashboard:  {}", links.dashboard));
    ui::plain(&format!("App:        {}", links.app));
    system::open_in_browser(&links.dashboard);
    Ok(())
}

/// Commit message for a deploy made at `at`.
pub fn commit_message(at: DateTime<Utc>) -> String {
    format!("befast deploy {}", at.format("%Y-%m-%d %H:%M:%S UTC"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BefastError;
    use chrono::TimeZone;
    use std::path::PathBuf;

    #[test]
    fn test_links() {
        let target = DeployTarget {
            owner: "befast-apps".into(),
            repo: "shop-1a2b".into(),
            domain: "shop.acme.dev".into(),
        };
        let links = DeployLinks::new("https://befast.acme.dev", &target);
        assert_eq!(links.repository, "https://github.com/befast-apps/shop-1a2b");
        assert_eq!(links.dashboard, "https://befast.acme.dev/shop-1a2b");
        assert_eq!(links.app, "https://shop.acme.dev");
    }

    #[test]
    fn test_commit_message_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(commit_message(at), "befast deploy 2024-03-09 14:05:00 UTC");
    }

    #[tokio::test]
    async fn test_requires_host() {
        let cfg = AppConfig::from_file(PathBuf::from("unused.toml"), Default::default(), false);
        let err = handle_deploy(DeployArgs { name: None }, &cfg)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BefastError>(),
            Some(BefastError::Usage { message, .. }) if message == "Missing host"
        ));
    }
}
