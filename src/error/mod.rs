//! Error types for the Blossom dashboard.
//!
//! Each domain has its own `thiserror` enum: the REST client (`ApiError`),
//! local form validation (`ValidationErrors`), configuration (`ConfigError`),
//! the order socket (`SocketError`) and spreadsheet export (`ExportError`).
//! `Error` aggregates them so callers can use `?` across layers.

pub mod api;
pub mod config;
pub mod export;
pub mod socket;
pub mod validation;

use thiserror::Error;

pub use api::ApiError;
pub use config::ConfigError;
pub use export::ExportError;
pub use socket::SocketError;
pub use validation::{FieldError, ValidationErrors};

/// Main error type for the dashboard core.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// A request to the REST API failed.
    #[error(transparent)]
    ApiError(#[from] ApiError),
    /// A form failed local validation; nothing was sent.
    #[error(transparent)]
    ValidationError(#[from] ValidationErrors),
    /// The order socket failed.
    #[error(transparent)]
    SocketError(#[from] SocketError),
    /// The orders spreadsheet could not be built.
    #[error(transparent)]
    ExportError(#[from] ExportError),
}

impl Error {
    /// Text shown to the operator in a toast or inline error panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError(e) => e.user_message(),
            Self::ValidationError(e) => e.to_string(),
            Self::ExportError(_) => "The orders could not be exported.".to_string(),
            Self::ConfigError(_) | Self::SocketError(_) => {
                "Something went wrong, please reload the page.".to_string()
            }
        }
    }
}
