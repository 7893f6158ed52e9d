//! Error types for the gateway
//!
//! Every failure a resolver can surface comes from the downstream search
//! engine; the variants below classify them the way GraphQL clients see them.

use serde::Deserialize;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Gateway error taxonomy
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The engine could not be reached (connect failure, timeout, reset)
    #[error("search engine unavailable: {0}")]
    SearchEngineUnavailable(String),

    /// The requested index does not exist
    #[error("index `{0}` not found")]
    IndexNotFound(String),

    /// The engine rejected the request (malformed filter, sort, ...)
    #[error("{message}")]
    InvalidArgument { code: String, message: String },

    /// Any other non-success engine response
    #[error("search engine returned HTTP {status}: {message}")]
    Engine { status: u16, message: String },

    /// A success response whose body did not match the expected shape
    #[error("failed to decode search engine response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Stable machine-readable code exposed in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::SearchEngineUnavailable(_) => "SEARCH_ENGINE_UNAVAILABLE",
            GatewayError::IndexNotFound(_) => "INDEX_NOT_FOUND",
            GatewayError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            GatewayError::Engine { .. } | GatewayError::Decode(_) => "SEARCH_ENGINE_ERROR",
        }
    }

    /// Classify a non-2xx engine response.
    ///
    /// `index_uid` is the index the request targeted, if any; a bare 404 on
    /// an index path is reported as a missing index even when the body
    /// carries no engine error code.
    pub fn from_engine_response(status: u16, body: &str, index_uid: Option<&str>) -> Self {
        let parsed: Option<EngineErrorBody> = serde_json::from_str(body).ok();

        let (code, kind, message) = match parsed {
            Some(err) => (err.code, err.kind, err.message),
            None => (None, None, body.trim().to_string()),
        };

        if code.as_deref() == Some("index_not_found") || (status == 404 && index_uid.is_some()) {
            let uid = index_uid.unwrap_or_default().to_string();
            return GatewayError::IndexNotFound(uid);
        }

        // Older engines tag request errors with `errorType`/`type`
        // `invalid_request_error`, newer ones with `invalid_request`.
        let invalid_request = kind
            .as_deref()
            .map(|k| k.starts_with("invalid_request"))
            .unwrap_or(false);

        if invalid_request || status == 400 {
            return GatewayError::InvalidArgument {
                code: code.unwrap_or_else(|| "bad_request".to_string()),
                message,
            };
        }

        GatewayError::Engine { status, message }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::SearchEngineUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Error payload returned by the engine on non-2xx responses
#[derive(Debug, Deserialize)]
struct EngineErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, alias = "errorCode")]
    code: Option<String>,
    #[serde(default, rename = "type", alias = "errorType")]
    kind: Option<String>,
}
