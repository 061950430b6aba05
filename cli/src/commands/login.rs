//! # BeFast Login Handler
//!
//! File: cli/src/commands/login.rs
//!
//! ## Overview
//!
//! This module implements `befast login <host> [refresh]`, a device-code style
//! exchange with a BeFast host:
//!
//! 1. The host argument is normalized to `hostname[:port]`.
//! 2. Without a refresh token, `POST /api/apikey/create` returns a code, a
//!    refresh token and a confirmation page. The code and page URL are
//!    printed and the page is opened in the browser (best-effort). A failed
//!    request is fatal and tells the user to check the host's setup.
//! 3. The host is polled with the refresh token until it issues an API key.
//!    Errors while polling are transient: they are logged and retried at the
//!    same fixed interval, with no attempt limit.
//! 4. `{host, apikey}` is written to the config store.
//!
//! Passing a refresh token resumes an interrupted login at step 3.
//!
//! ## Architecture
//!
//! Polling is driven by an explicit `PollPolicy` (initial delay, interval,
//! which errors to swallow, and a `CancellationToken`). Ctrl-C cancels the
//! token, ending the loop with `BefastError::Cancelled`. The HTTP side is
//! reached through the `ApiKeyIssuer` trait so tests can run the loop against
//! a fake host on a paused clock.
//!
//! ## Usage
//!
//! ```bash
//! befast login befast.example.com
//! befast login https://befast.example.com/dashboard   # scheme and path are dropped
//! befast login befast.example.com r-8f2c...           # resume with a refresh token
//! ```
//!
use crate::common::network::{
    self,
    http::{ApiClient, ApiKeyIssuer},
};
use crate::common::{system, ui};
use crate::core::config::{self, AppConfig, Credentials};
use crate::core::error::{BefastError, Result};
use clap::Parser;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Time between two polls of the key-issuance endpoint.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// # Login Arguments (`LoginArgs`)
#[derive(Parser, Debug)]
#[command(about = "Log in to a BeFast host and store an API key")]
pub struct LoginArgs {
    /// Host to log in to, e.g. `befast.example.com` (scheme and path are ignored).
    host: Option<String>,

    /// Refresh token of a login that was already started.
    refresh: Option<String>,
}

/// In-flight login state. Dropped once the credentials are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub host: String,
    pub refresh_token: String,
    pub apikey: Option<String>,
}

/// How the API-key poll loop waits, retries and stops.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Wait before the first poll.
    pub initial_delay: Duration,
    /// Wait between polls.
    pub interval: Duration,
    /// Returns true for errors that should be retried instead of returned.
    pub swallow: fn(&anyhow::Error) -> bool,
    pub cancel: CancellationToken,
}

impl PollPolicy {
    /// Fixed 5 second cadence, every error retried.
    pub fn new(cancel: CancellationToken) -> Self {
        PollPolicy {
            initial_delay: POLL_INTERVAL,
            interval: POLL_INTERVAL,
            swallow: swallow_all,
            cancel,
        }
    }
}

fn swallow_all(_: &anyhow::Error) -> bool {
    true
}

/// Handler for `befast login`.
pub async fn handle_login(args: LoginArgs, cfg: &AppConfig) -> Result<()> {
    info!("Handling login command...");
    debug!("Login args: host={:?}, refresh given: {}", args.host, args.refresh.is_some());

    let host = network::normalize_host(args.host.as_deref().unwrap_or_default());
    if host.is_empty() {
        return Err(BefastError::usage("Missing host", "befast login [host]").into());
    }

    let client = ApiClient::new(&host)?;
    let session = match args.refresh {
        Some(refresh_token) => AuthSession {
            host: host.clone(),
            refresh_token,
            apikey: None,
        },
        None => start_session(&client, &host).await?,
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut policy = PollPolicy::new(cancel);
    if cfg.debug {
        policy.initial_delay = Duration::ZERO;
    }

    ui::muted("Waiting for confirmation...");
    let credentials = complete_login(&client, session, &policy, &cfg.config_path).await?;
    ui::success(&format!("{} successfully configured.", credentials.host));
    Ok(())
}

/// Requests a new refresh token and sends the user to the confirmation page.
async fn start_session(client: &ApiClient, host: &str) -> Result<AuthSession> {
    let request = client.create_apikey().await?;

    ui::muted(&format!("Your code should read: {}", request.code));
    ui::muted("Please visit following page to confirm:");
    ui::blank();
    let url = client.url(&request.pathname);
    ui::emphasis(&url);
    system::open_in_browser(&url);

    Ok(AuthSession {
        host: host.to_string(),
        refresh_token: request.refresh,
        apikey: None,
    })
}

/// Polls for the API key, then persists `{host, apikey}` to `config_path`.
pub async fn complete_login<I: ApiKeyIssuer>(
    issuer: &I,
    session: AuthSession,
    policy: &PollPolicy,
    config_path: &Path,
) -> Result<Credentials> {
    let apikey = wait_for_apikey(issuer, &session.refresh_token, policy).await?;
    let credentials = Credentials {
        host: session.host,
        apikey,
    };
    config::save_credentials(config_path, &credentials)?;
    Ok(credentials)
}

/// Polls `issuer` under `policy` until it returns a key.
///
/// Waits `policy.initial_delay`, then polls every `policy.interval`. There is
/// no attempt limit: a pending answer or a swallowed error just leads to the
/// next poll. Both the waits and the requests race against `policy.cancel`.
///
/// # Arguments
///
/// * `issuer` - The host (or a fake) that eventually hands out the key.
/// * `refresh` - Refresh token obtained from `create_apikey`.
/// * `policy` - Delays, the swallow predicate and the cancellation token.
///
/// # Returns
///
/// * `Result<String>` - The issued API key.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The cancellation token fires (`BefastError::Cancelled`).
/// - A poll fails with an error `policy.swallow` does not accept.
pub async fn wait_for_apikey<I: ApiKeyIssuer>(
    issuer: &I,
    refresh: &str,
    policy: &PollPolicy,
) -> Result<String> {
    pause(policy, policy.initial_delay).await?;
    let mut attempt: u64 = 0;
    loop {
        attempt += 1;
        // `biased` checks cancellation first, so a cancelled token never polls.
        let polled = tokio::select! {
            biased;
            _ = policy.cancel.cancelled() => return Err(BefastError::Cancelled("Login".into()).into()),
            polled = issuer.fetch_apikey(refresh) => polled,
        };
        match polled {
            Ok(Some(apikey)) => {
                info!("API key issued after {} poll(s)", attempt);
                return Ok(apikey);
            }
            Ok(None) => debug!("Poll {}: not confirmed yet", attempt),
            Err(e) if (policy.swallow)(&e) => debug!("Poll {} failed, retrying: {:?}", attempt, e),
            Err(e) => return Err(e),
        }
        debug!("waiting {:?}...", policy.interval);
        pause(policy, policy.interval).await?;
    }
}

async fn pause(policy: &PollPolicy, duration: Duration) -> Result<()> {
    tokio::select! {
        biased;
        _ = policy.cancel.cancelled() => Err(BefastError::Cancelled("Login".into()).into()),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}
