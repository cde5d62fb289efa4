//! Failures of the Remote Data Client.
//!
//! Every HTTP failure is mapped to one variant at the point the response is
//! received, so callers only ever match on this enum. `user_message` gives the
//! text the UI shows: the server's own reason when it sent one, a generic
//! message otherwise.

use thiserror::Error;

const GENERIC_FAILURE: &str = "The request failed. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No credential was available; the request was never sent.
    #[error("No authentication token available")]
    AuthenticationMissing,
    /// The server rejected the credential (HTTP 401/403).
    #[error("Authentication token was rejected by the server")]
    AuthenticationExpired,
    /// HTTP 404.
    #[error("Resource not found: {0}")]
    NotFound(String),
    /// HTTP 409, e.g. deleting a catalog entity still referenced by orders.
    #[error("Request conflicts with existing data: {0}")]
    Conflict(String),
    /// Any other 4xx/5xx response.
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    ServerRejected {
        status: u16,
        message: Option<String>,
    },
    /// The request never completed.
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),
    /// A successful response whose body could not be decoded.
    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Text shown to the operator for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationMissing => {
                "You are not signed in. Please sign in and try again.".to_string()
            }
            Self::AuthenticationExpired => {
                "Your session has expired. Please retry.".to_string()
            }
            Self::NotFound(message) | Self::Conflict(message) if !message.is_empty() => {
                message.clone()
            }
            Self::NotFound(_) => "The requested item could not be found.".to_string(),
            Self::ServerRejected {
                message: Some(message),
                ..
            } => message.clone(),
            Self::NetworkUnavailable(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// Whether this is the conflict raised when deleting an entity that still
    /// has dependent records.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
