//! Error types for the Coinbase Exchange client library.

use thiserror::Error;

/// The main error type for all Coinbase Exchange client operations.
#[derive(Error, Debug)]
pub enum CoinbaseError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Failure reported by a custom [`Transport`](crate::transport::Transport).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The exchange answered with a non-success status.
    #[error("Coinbase API error: {0}")]
    Api(ApiError),

    /// The response body could not be turned into the requested representation.
    #[error("Malformed response: {0}")]
    MalformedResponse(MalformedResponse),

    /// Caller-supplied arguments violate an operation's preconditions.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CoinbaseError {
    /// Shorthand for building an [`CoinbaseError::InvalidArgument`].
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Returns the malformed-response details, if this is one.
    pub fn as_malformed(&self) -> Option<&MalformedResponse> {
        match self {
            Self::MalformedResponse(details) => Some(details),
            _ => None,
        }
    }
}

impl From<MalformedResponse> for CoinbaseError {
    fn from(details: MalformedResponse) -> Self {
        Self::MalformedResponse(details)
    }
}

/// Error returned by the exchange in a non-2xx response.
///
/// Coinbase reports failures as `{"message": "..."}` together with the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// The `message` field of the response body, or the raw body when absent.
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl ApiError {
    /// Create a new API error from status and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Build an API error from a response body.
    ///
    /// Falls back to the trimmed body when it carries no `message` field.
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: String,
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self::new(status, parsed.message),
            Err(_) => Self::new(status, body.trim()),
        }
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Check if the exchange throttled the request.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Check if the request was rejected for missing or bad credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// Check if the exchange had an internal failure.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// Details of a response that could not be materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedResponse {
    /// Underlying parser message.
    pub reason: String,
    /// Offending field, when it could be identified.
    pub key: Option<String>,
    /// Position of the offending element in a list response.
    pub element: Option<usize>,
}

impl MalformedResponse {
    /// Create a malformed-response error with only a reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            key: None,
            element: None,
        }
    }

    /// Attach the offending key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach the position of the offending list element.
    pub fn at_element(mut self, index: usize) -> Self {
        self.element = Some(index);
        self
    }
}

impl std::fmt::Display for MalformedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)?;
        match (&self.key, self.element) {
            (Some(key), Some(index)) => write!(f, " (key `{}` in element {})", key, index),
            (Some(key), None) => write!(f, " (key `{}`)", key),
            (None, Some(index)) => write!(f, " (element {})", index),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for MalformedResponse {}
