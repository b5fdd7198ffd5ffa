//! Falcon API client error types.
//!
//! Every failure the client can produce collapses into one of two variants:
//! the credential exchange failed, or a resource call failed. Both carry the
//! most useful human-readable message available from the platform.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Result type for Falcon API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the Falcon API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The OAuth2 client-credentials exchange failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A resource request returned a non-2xx status or never completed.
    #[error("API request failed: {0}")]
    ApiRequest(String),
}

impl ClientError {
    /// Create an authentication error.
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an API request error.
    pub fn api_request(msg: impl Into<String>) -> Self {
        Self::ApiRequest(msg.into())
    }
}

/// Message used when the platform returned an error status with no usable body.
pub(crate) fn status_message(status: StatusCode) -> String {
    format!("request failed with status code {}", status.as_u16())
}

/// First entry of the `errors` array in a Falcon response body, if any.
///
/// Empty messages are treated as absent.
pub(crate) fn first_error_message(body: &Value) -> Option<String> {
    body.get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Best message from an error response body: `errors[0].message`, then a
/// top-level `message`. Only the first structured error is surfaced.
pub(crate) fn api_error_message(raw_body: &str) -> Option<String> {
    let body: Value = serde_json::from_str(raw_body).ok()?;

    first_error_message(&body).or_else(|| {
        body.get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    })
}
