//! Error handling for vRA API operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Transport-level error type for requests issued through [`crate::Client`].
///
/// Catalog-level operation errors ([`CatalogError`]) wrap this type; nothing
/// in this crate retries or recovers, every error surfaces to the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{status} from {path}: {detail}")]
    ErrorResponse {
        status: StatusCode,
        path: String,
        detail: String,
    },
    /// Connection or protocol failure before a response was produced.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The client could not be constructed from the given configuration.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Whether this error is an HTTP 404 response.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::ErrorResponse {
                status: StatusCode::NOT_FOUND,
                ..
            }
        )
    }
}

/// Error type for catalog resource operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested catalog item does not exist. Raised only by the
    /// fetch-by-id path, translated from a transport 404; callers never see
    /// the raw 404 from that path.
    #[error("catalog ID {id} does not exist")]
    NotFound { id: String },
    /// A resource was constructed with neither an id nor pre-fetched data.
    #[error("must supply either an `id` or a `data` record")]
    Validation,
    /// A template endpoint returned a body that is not valid JSON.
    #[error("malformed template payload")]
    Parse(#[from] serde_json::Error),
    /// Filesystem failure while writing templates.
    #[error("failed to write template")]
    Io(#[from] std::io::Error),
    /// Any other transport failure, passed through verbatim.
    #[error(transparent)]
    Client(#[from] ClientError),
}
