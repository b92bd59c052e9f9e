//! Error types for dashboard operations

use thiserror::Error;

/// Dashboard specific errors
///
/// Whatever the variant, the controller surfaces the `Display` text as the
/// single user-visible error message.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Transport failure talking to the backend
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
    },

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 2xx analysis response without the expected text field
    #[error("Response is missing the `{field}` field")]
    MissingField {
        field: &'static str,
    },

    /// Backend URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Ticker that cannot be sent as a path segment
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Host input could not be parsed into a command
    #[error("Command error: {0}")]
    Command(String),
}

impl DashboardError {
    /// Build a `Server` error from a failed response body.
    ///
    /// Uses the body's `error` field when it is a non-empty string, else
    /// `fallback`. Bodies that are not JSON fall back as well.
    pub fn from_failure_body(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
            })
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        Self::Server { status, message }
    }

    /// HTTP status for `Server` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
