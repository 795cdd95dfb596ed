//! Error types for the order-management client.
//!
//! Every failure surfaces through [`Error`]. Local order-rule violations are
//! raised before any request is sent; non-2xx responses are decoded into an
//! [`ApiError`] carrying the status code, message and sub-errors.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (connect, TLS, read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request body could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-2xx response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Response body matched neither the `{"data": ...}` envelope nor the
    /// bare shape of the expected type.
    #[error("failed to decode {context}: {source}")]
    Decode {
        /// What was being decoded
        context: String,
        /// Error from decoding the bare body
        #[source]
        source: serde_json::Error,
    },

    /// An order or complex order broke a structural rule. Raised before
    /// any network access.
    #[error("Order validation failed: {0}")]
    Validation(String),

    /// Invalid input provided to a function.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No session token is held; log in first.
    #[error("Not authenticated; login required")]
    NotAuthenticated,

    /// Session token has expired, or expires within the safety margin.
    /// There is no silent refresh: log in again.
    #[error("Session expired; re-authentication required")]
    SessionExpired,

    /// Operation did not finish before its deadline.
    #[error("Request timeout")]
    Timeout,

    /// Operation was cancelled through its cancellation token.
    #[error("Operation cancelled")]
    Cancelled,

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api(api) if api.is_not_found())
    }

    /// Returns `true` for a 401 response.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(api) if api.is_unauthorized())
    }

    /// Returns `true` for a 403 response.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Error::Api(api) if api.is_forbidden())
    }

    /// Returns `true` if this is an authentication-related error.
    ///
    /// Covers the locally detected session conditions as well as a 401
    /// from the server.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::NotAuthenticated | Error::SessionExpired) || self.is_unauthorized()
    }

    /// Returns `true` if the order was rejected locally.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api(api) => (400..500).contains(&api.status),
            Error::Validation(_) | Error::InvalidInput(_) | Error::UrlParse(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api(api) if api.status >= 500)
    }
}

/// A non-2xx response from the API.
///
/// Built only by the request pipeline, from either of the error shapes the
/// service emits:
///
/// ```json
/// {"error": {"code": "...", "message": "...", "errors": [...]}}
/// {"code": "...", "message": "...", "errors": [...]}
/// ```
///
/// Bodies that fit neither shape keep their raw text as the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("API error: status={status}, code={code:?}, message={message}")]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Optional error code from the API
    pub code: Option<String>,
    /// Human-readable error message
    pub message: String,
    /// Detail messages, one per sub-error
    pub errors: Vec<String>,
}

impl ApiError {
    /// Build an API error from a response status and raw body.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| Self::from_json(status, &value));

        parsed.unwrap_or_else(|| {
            let text = body.trim();
            let message = if text.is_empty() {
                format!("HTTP {status}")
            } else {
                text.to_string()
            };
            ApiError {
                status,
                code: None,
                message,
                errors: Vec::new(),
            }
        })
    }

    fn from_json(status: u16, value: &Value) -> Option<Self> {
        let object = match value.get("error") {
            Some(Value::String(message)) => {
                return Some(ApiError {
                    status,
                    code: None,
                    message: message.clone(),
                    errors: Vec::new(),
                })
            }
            Some(nested @ Value::Object(_)) => nested,
            _ => value,
        };

        let code = object.get("code").and_then(value_as_string);
        let message = object.get("message").and_then(Value::as_str).map(String::from);
        let errors: Vec<String> = object
            .get("errors")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(sub_error_message).collect())
            .unwrap_or_default();

        if code.is_none() && message.is_none() && errors.is_empty() {
            return None;
        }

        let message = message
            .or_else(|| errors.first().cloned())
            .or_else(|| code.clone())
            .unwrap_or_else(|| "Unknown API error".to_string());

        Some(ApiError {
            status,
            code,
            message,
            errors,
        })
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns `true` for a 401 response.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Returns `true` for a 403 response.
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// Returns `true` for a 429 response.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Sub-errors arrive either as plain strings or as `{code, message}` objects.
fn sub_error_message(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => item
            .get("message")
            .and_then(Value::as_str)
            .map(String::from)
            .or_else(|| item.get("code").and_then(value_as_string)),
        _ => None,
    }
}
