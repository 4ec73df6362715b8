//! Configuration types for vRA client construction.

use std::collections::BTreeMap;

/// Configuration for vRA client construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the vRA appliance, e.g. `https://vra.corp.local`.
    pub base_url: String,
    /// Optional bearer token for API authentication.
    pub token: Option<String>,
    /// Additional headers to include in every request.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional user agent override.
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Config with only a base URL set; no auth, no extra headers.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            extra_headers: BTreeMap::new(),
            user_agent: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
