//! Error types for the interview agent client
//!
//! Every call against the interview service resolves to either a typed
//! value or a [`ClientError`]. Call sites surface the error inline using
//! [`ClientError::user_message`], which prefers the backend's `detail`
//! string and falls back to a per-operation message.

use thiserror::Error;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The service answered with a non-2xx status
    #[error("HTTP {status}: {}", detail.as_deref().unwrap_or("request failed"))]
    Http {
        /// Status code returned by the service
        status: u16,
        /// `detail` field of a `{detail: string}` error body, if present
        detail: Option<String>,
    },

    /// Connection, timeout or other transport failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The service returned a question earlier than the current one
    #[error("Question {received} does not follow question {current}")]
    ProgressRegression {
        /// Number of the question currently displayed
        current: u32,
        /// Number of the question the service returned
        received: u32,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ClientError {
    /// Human-readable detail supplied by the service, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Http {
                detail: Some(detail),
                ..
            } => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Message to display for a failed operation
    ///
    /// Returns the service's `detail` when one was provided, the error's own
    /// text for failures raised on the client side, and `fallback` for
    /// everything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use interview_agent::error::ClientError;
    ///
    /// let err = ClientError::Http { status: 404, detail: Some("Agent not found".into()) };
    /// assert_eq!(err.user_message("Failed to load agent"), "Agent not found");
    ///
    /// let err = ClientError::Http { status: 500, detail: None };
    /// assert_eq!(err.user_message("Failed to load agent"), "Failed to load agent");
    /// ```
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(_) | ClientError::ProgressRegression { .. } => {
                self.to_string()
            }
            _ => self.detail().unwrap_or(fallback).to_string(),
        }
    }

    /// Status code of an HTTP failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result of a single library operation
pub type ApiResult<T> = std::result::Result<T, ClientError>;

/// Result type alias used by command handlers
///
/// Uses `anyhow::Error` so handlers can attach context while propagating.
pub type Result<T> = anyhow::Result<T>;
