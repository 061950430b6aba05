//! # BeFast Domains Handler
//!
//! File: cli/src/commands/domains.rs
//!
//! ## Overview
//!
//! This module implements `befast domains add <domain> <project>`, which
//! attaches a custom domain to a project deployed on the configured host via
//! `POST /api/domains`. The domain is normalized like a host, so pasting a
//! full URL works.
//!
//! ## Usage
//!
//! ```bash
//! befast domains add shop.acme.dev shop
//! befast domains add https://shop.acme.dev/ shop   # same as above
//! ```
//!
use crate::common::network::{self, http::ApiClient};
use crate::common::ui;
use crate::core::config::AppConfig;
use crate::core::error::{BefastError, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

const ADD_USAGE: &str = "befast domains add [domain] [project]";

/// # Domains Arguments (`DomainsArgs`)
#[derive(Parser, Debug)]
pub struct DomainsArgs {
    #[command(subcommand)]
    command: DomainsCommand,
}

#[derive(Subcommand, Debug)]
enum DomainsCommand {
    /// Attach a custom domain to a project.
    Add(AddArgs),
}

#[derive(Parser, Debug)]
struct AddArgs {
    /// Domain to attach, e.g. `shop.acme.dev`.
    domain: Option<String>,
    /// Project (deploy name) the domain should point at.
    project: Option<String>,
}

/// Handler for `befast domains`.
pub async fn handle_domains(args: DomainsArgs, cfg: &AppConfig) -> Result<()> {
    match args.command {
        DomainsCommand::Add(add) => handle_add(add, cfg).await,
    }
}

async fn handle_add(args: AddArgs, cfg: &AppConfig) -> Result<()> {
    info!("Handling domains add command...");
    debug!("Domains add args: {:?}", args);

    let (domain, project) = validate_add_args(&args)?;
    let creds = cfg.require_host()?;

    let client = ApiClient::new(&creds.host)?.with_apikey(&creds.apikey);
    client.add_domain(&project, &domain).await?;

    ui::muted(&format!("{} added successfully.", domain));
    Ok(())
}

/// Normalized domain and project, or a usage error naming what is missing.
fn validate_add_args(args: &AddArgs) -> Result<(String, String)> {
    let domain = network::normalize_host(args.domain.as_deref().unwrap_or_default());
    if domain.is_empty() {
        return Err(BefastError::usage("missing domain", ADD_USAGE).into());
    }
    let project = args.project.clone().unwrap_or_default();
    if project.trim().is_empty() {
        return Err(BefastError::usage("missing project", ADD_USAGE).into());
    }
    Ok((domain, project))
}
