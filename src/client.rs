//! HTTP client wrapper for the vRA REST API.

use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking;
use reqwest::header::{self, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::catalog::Catalog;
use crate::config::ClientConfig;
use crate::error::ClientError;

/// A client for the vRA REST API.
///
/// Wraps a blocking `reqwest` client configured with bearer token
/// authentication and request timeouts. All requests are synchronous;
/// resource types ([`crate::CatalogItem`], [`crate::CatalogSource`], ...)
/// borrow the client rather than owning it.
pub struct Client {
    http: blocking::Client,
    base_url: Url,
}

impl Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidConfig(format!("base URL: {e}")))?;
        let http = build_http_client(&config)?;

        Ok(Self { http, base_url })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Handle for catalog-wide operations (listing, entitled items).
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(self)
    }

    /// Issue a GET request and decode the JSON response body.
    pub fn get_parsed<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.get(path)?;
        response.json().map_err(ClientError::Transport)
    }

    /// Issue a GET request and return the raw response body, uninterpreted.
    pub fn get_raw(&self, path: &str) -> Result<String, ClientError> {
        let response = self.get(path)?;
        response.text().map_err(ClientError::Transport)
    }

    /// Issue a POST request with a JSON body and decode the JSON response.
    pub fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        debug!(path, "sending POST request");
        let url = self.url(path)?;
        let response = self.http.post(url).json(body).send()?;
        let response = check_status(path, response)?;
        response.json().map_err(ClientError::Transport)
    }

    fn get(&self, path: &str) -> Result<blocking::Response, ClientError> {
        debug!(path, "sending GET request");
        let url = self.url(path)?;
        let response = self.http.get(url).send()?;
        check_status(path, response)
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidConfig(format!("request path {path:?}: {e}")))
    }
}

/// Turn a non-success response into an [`ClientError::ErrorResponse`].
fn check_status(
    path: &str,
    response: blocking::Response,
) -> Result<blocking::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .text()
        .ok()
        .and_then(|body| extract_detail(&body))
        // The body may be HTML garbage from a proxy, so don't echo it.
        .unwrap_or_else(|| "response body omitted".to_string());

    Err(ClientError::ErrorResponse {
        status,
        path: path.to_string(),
        detail,
    })
}

/// Pull the human-readable detail out of a vRA error body, if it has one.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("message")
        .or_else(|| parsed.get("detail"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Build the underlying HTTP client with bearer token auth and timeouts.
fn build_http_client(config: &ClientConfig) -> Result<blocking::Client, ClientError> {
    let mut headers = HeaderMap::new();

    if let Some(token) = &config.token {
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::InvalidConfig(e.to_string()))?,
        );
    }

    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key)
                .map_err(|e| ClientError::InvalidConfig(e.to_string()))?,
            header::HeaderValue::from_str(value)
                .map_err(|e| ClientError::InvalidConfig(e.to_string()))?,
        );
    }

    debug!(
        base_url = %config.base_url,
        has_token = config.token.is_some(),
        extra_headers = config.extra_headers.len(),
        "building vRA HTTP client"
    );

    let client_builder = blocking::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(60));

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder
        .build()
        .map_err(|e| ClientError::InvalidConfig(e.to_string()))
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> Client {
        Client::new(ClientConfig::new(server.base_url())).unwrap()
    }

    #[test]
    fn bearer_token_set_on_requests() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.path("/ping").header("authorization", "Bearer sekrit");
            then.status(200).json_body(json!({}));
        });

        let config = ClientConfig::new(server.base_url()).with_token("sekrit");
        let client = Client::new(config).unwrap();
        let _: serde_json::Value = client.get_parsed("/ping").unwrap();
        mock.assert();
    }

    #[test]
    fn extra_headers_set_on_requests() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.path("/ping").header("x-vra-test", "test-value");
            then.status(200).json_body(json!({}));
        });

        let mut config = ClientConfig::new(server.base_url());
        config
            .extra_headers
            .insert("x-vra-test".to_string(), "test-value".to_string());

        let client = Client::new(config).unwrap();
        let _: serde_json::Value = client.get_parsed("/ping").unwrap();
        mock.assert();
    }

    #[test]
    fn error_response_carries_status_and_detail() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/broken");
            then.status(500).json_body(json!({"message": "boom"}));
        });

        let err = client_for(&server)
            .get_raw("/broken")
            .expect_err("expected an error response");
        match err {
            ClientError::ErrorResponse {
                status,
                path,
                detail,
            } => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(path, "/broken");
                assert_eq!(detail, "boom");
            }
            other => panic!("expected ErrorResponse, found: {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_is_omitted() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/proxy-error");
            then.status(502).body("<html>bad gateway</html>");
        });

        let err = client_for(&server).get_raw("/proxy-error").unwrap_err();
        assert!(err.to_string().contains("response body omitted"), "{err}");
    }

    #[test]
    fn not_found_is_detectable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/gone");
            then.status(404).json_body(json!({"message": "nope"}));
        });

        let err = client_for(&server).get_raw("/gone").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Client::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig(_)));
    }
}
