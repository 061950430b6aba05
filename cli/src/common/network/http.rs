//! # BeFast Control-Plane Client
//!
//! File: cli/src/common/network/http.rs
//!
//! ## Overview
//!
//! `ApiClient` wraps a `reqwest::Client` bound to one host's origin
//! (`https://<host>`) and, once logged in, its API key (sent as `x-apikey`).
//!
//! | Method | Endpoint | Response |
//! |---|---|---|
//! | `create_apikey` | `POST /api/apikey/create` | `{code, refresh, pathname}` |
//! | `fetch_apikey` | `GET /api/apikey/create?refresh=<token>` | `{apikey?}` |
//! | `add_domain` | `POST /api/domains` `{project, domain}` | status only |
//! | `deploy` | `POST /api/deploy` `{host, name}` | `{owner, repo, domain}` |
//!
//! A non-success status on `create_apikey`, `add_domain` or `deploy` is a
//! `BefastError::Remote` with guidance for the user. `fetch_apikey` returns
//! plain errors because the login poll loop treats them as transient.
//!
use crate::core::error::{BefastError, Result};
use anyhow::Context;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const APIKEY_HEADER: &str = "x-apikey";

/// Reply to `POST /api/apikey/create`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyRequest {
    /// Short code the confirmation page displays.
    pub code: String,
    /// Token to poll with until the key is issued.
    pub refresh: String,
    /// Path of the confirmation page on the host.
    pub pathname: String,
}

#[derive(Deserialize, Debug, Default)]
struct ApiKeyPoll {
    #[serde(default)]
    apikey: Option<String>,
}

/// Reply to `POST /api/deploy`: where to push and where the app will live.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeployTarget {
    pub owner: String,
    pub repo: String,
    pub domain: String,
}

#[derive(Serialize)]
struct DomainBody<'a> {
    project: &'a str,
    domain: &'a str,
}

#[derive(Serialize)]
struct DeployBody<'a> {
    host: &'a str,
    name: &'a str,
}

/// Source of API keys for the login poll loop.
#[allow(async_fn_in_trait)]
pub trait ApiKeyIssuer {
    /// `Ok(None)` while the login is not confirmed yet.
    async fn fetch_apikey(&self, refresh: &str) -> Result<Option<String>>;
}

/// HTTP client for one BeFast host.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    host: String,
    origin: String,
    apikey: Option<String>,
}

fn client_builder() -> ClientBuilder {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("befast/", env!("CARGO_PKG_VERSION")))
}

impl ApiClient {
    /// Client for `https://<host>`; `host` should already be normalized.
    pub fn new(host: &str) -> Result<Self> {
        let client = client_builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(ApiClient {
            client,
            host: host.to_string(),
            origin: format!("https://{}", host),
            apikey: None,
        })
    }

    /// Sends requests to `origin` (e.g. `http://127.0.0.1:4000`) instead of
    /// `https://<host>`. Proxies are bypassed for the override.
    #[cfg(test)]
    pub(crate) fn with_origin(mut self, origin: &str) -> Result<Self> {
        self.client = client_builder()
            .no_proxy()
            .build()
            .context("Failed to create HTTP client")?;
        self.origin = origin.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Attaches the API key sent with authenticated requests.
    pub fn with_apikey(mut self, apikey: &str) -> Self {
        self.apikey = Some(apikey.to_string());
        self
    }

    pub fn origin(&self) -> String {
        self.origin.clone()
    }

    /// Absolute URL of `path` (which starts with `/`) on this host.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin(), path)
    }

    /// Starts a login: asks the host for a confirmation code and refresh token.
    pub async fn create_apikey(&self) -> Result<ApiKeyRequest> {
        let url = self.url("/api/apikey/create");
        debug!("POST {}", url);
        let res = self.client.post(&url).send().await;
        let res = match res {
            Ok(res) if res.status().is_success() => res,
            Ok(res) => {
                debug!("{} answered {}", url, res.status());
                return Err(self.setup_error("Could not create apikey."));
            }
            Err(e) => {
                debug!("{} failed: {}", url, e);
                return Err(self.setup_error("Could not create apikey."));
            }
        };
        let data: ApiKeyRequest = res
            .json()
            .await
            .context("Unexpected response from /api/apikey/create")?;
        debug!("apikey request: {:?}", data);
        Ok(data)
    }

    /// Registers `domain` for `project`.
    pub async fn add_domain(&self, project: &str, domain: &str) -> Result<()> {
        let url = self.url("/api/domains");
        debug!("POST {} {{project: {}, domain: {}}}", url, project, domain);
        let res = self
            .authed(self.client.post(&url))
            .json(&DomainBody { project, domain })
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;
        if !res.status().is_success() {
            debug!("{} answered {}", url, res.status());
            return Err(BefastError::Remote("Something went wrong.".to_string()).into());
        }
        Ok(())
    }

    /// Asks the host to prepare a deploy of `name`.
    pub async fn deploy(&self, name: &str) -> Result<DeployTarget> {
        let url = self.url("/api/deploy");
        debug!("POST {} {{host: {}, name: {}}}", url, self.host, name);
        let res = self
            .authed(self.client.post(&url))
            .json(&DeployBody {
                host: &self.host,
                name,
            })
            .send()
            .await;
        let res = match res {
            Ok(res) if res.status().is_success() => res,
            Ok(res) => {
                debug!("{} answered {}", url, res.status());
                return Err(self.setup_error("Deploy request rejected."));
            }
            Err(e) => {
                debug!("{} failed: {}", url, e);
                return Err(self.setup_error("Deploy request failed."));
            }
        };
        let target: DeployTarget = res
            .json()
            .await
            .context("Unexpected response from /api/deploy")?;
        debug!("deploy target: {:?}", target);
        Ok(target)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.apikey {
            Some(key) => builder.header(APIKEY_HEADER, key),
            None => builder,
        }
    }

    fn setup_error(&self, what: &str) -> anyhow::Error {
        BefastError::Remote(format!(
            "{} Ensure BeFast is setup on host {}",
            what, self.host
        ))
        .into()
    }
}

impl ApiKeyIssuer for ApiClient {
    async fn fetch_apikey(&self, refresh: &str) -> Result<Option<String>> {
        let url = self.url("/api/apikey/create");
        debug!("GET {}?refresh=<token>", url);
        let res = self
            .client
            .get(&url)
            .query(&[("refresh", refresh)])
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()?;
        let poll: ApiKeyPoll = res.json().await.context("Unexpected apikey poll response")?;
        Ok(poll.apikey.filter(|k| !k.is_empty()))
    }
}
