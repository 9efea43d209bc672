//! Error types for the LLM layer

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when constructing or calling an LLM provider
#[derive(Debug, Error)]
pub enum LlmError {
    /// Missing credentials or unknown provider name
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider client support is not available in this build
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A generation call failed
    #[error(transparent)]
    ProviderRequest(#[from] RequestError),
}

impl LlmError {
    /// Errors that can only happen while building a provider. These are
    /// permanent for the lifetime of the process.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            LlmError::Configuration(_) | LlmError::ProviderUnavailable(_)
        )
    }

    /// Errors scoped to a single generation call
    pub fn is_request_error(&self) -> bool {
        matches!(self, LlmError::ProviderRequest(_))
    }
}

/// Failures of an individual `generate_response` call
#[derive(Debug, Error)]
pub enum RequestError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider answered with a non-success status
    #[error("HTTP error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// Connection, TLS or body transfer failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON encoding/decoding issues
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Provider returned no usable text
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// No answer within the allotted time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::MalformedResponse(err.to_string())
    }
}

#[cfg(feature = "google")]
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        // The URL is dropped so endpoint details never reach the caller
        let err = err.without_url();
        if let Some(status) = err.status() {
            RequestError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            RequestError::MalformedResponse(err.to_string())
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}
