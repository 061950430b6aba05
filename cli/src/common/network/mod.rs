//! # BeFast Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! Everything needed to talk to a BeFast host:
//!
//! - **`normalize_host`**: reduces whatever the user typed (`https://host/path`)
//!   to the bare `hostname[:port]` that is stored in the config and used to
//!   build `https://<host>` origins.
//! - **`http`**: `ApiClient`, a `reqwest` wrapper for the control-plane endpoints
//!   (API-key issuance, domains, deploys).
//!
//! ```rust
//! use crate::common::network::{self, http::ApiClient};
//!
//! let host = network::normalize_host("https://befast.example.com/dashboard");
//! assert_eq!(host, "befast.example.com");
//! let client = ApiClient::new(&host)?.with_apikey(&apikey);
//! ```
//!

/// HTTP client for the BeFast control plane.
pub mod http;

/// Strips an `http://` / `https://` scheme and everything from the first `/`.
/// Ports are kept.
pub fn normalize_host(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_scheme_and_path() {
        assert_eq!(normalize_host("https://example.com/foo/bar"), "example.com");
        assert_eq!(normalize_host("http://example.com/"), "example.com");
    }

    #[test]
    fn test_keeps_port() {
        assert_eq!(normalize_host("example.com:8080"), "example.com:8080");
        assert_eq!(normalize_host("https://example.com:8443/x"), "example.com:8443");
    }

    #[test]
    fn test_bare_and_empty() {
        assert_eq!(normalize_host("example.com"), "example.com");
        assert_eq!(normalize_host(""), "");
        assert_eq!(normalize_host("https://"), "");
    }
}
