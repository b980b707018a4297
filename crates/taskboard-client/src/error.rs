//! Error types for backend calls
//!
//! Every failed call ends up as a [`ClientError`]. For the invite dialogs the
//! error is then flattened into [`FieldErrors`], the single shape the
//! composer renders.

use taskboard_invite::FieldErrors;
use thiserror::Error;

use crate::config::ConfigError;

/// Backend call errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the submitted fields (HTTP 422).
    #[error("Validation failed: {message}")]
    Validation {
        /// Summary message from the backend.
        message: String,
        /// Per-field messages.
        errors: FieldErrors,
    },

    /// Session or CSRF token is missing or expired (HTTP 401 / 419).
    #[error("Session expired, reload the page and sign in again")]
    SessionExpired,

    /// The user may not perform this action (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-success response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API, or the raw body.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Client could not be configured.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for backend calls.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status associated with this error, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            ClientError::Validation { .. } => Some(422),
            ClientError::SessionExpired => Some(419),
            ClientError::Forbidden(_) => Some(403),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::InvalidResponse(_) | ClientError::Config(_) => None,
        }
    }

    /// Check if the failure says something about the submitted fields.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }

    /// Flatten into the field-keyed map the invite dialogs render.
    ///
    /// Validation errors keep their fields (falling back to the summary
    /// message when the backend sent none). Every other failure is reported
    /// under the general field.
    pub fn into_field_errors(self) -> FieldErrors {
        match self {
            ClientError::Validation { message, errors } if errors.is_empty() => {
                FieldErrors::general(message)
            }
            ClientError::Validation { errors, .. } => errors,
            other => FieldErrors::general(other.to_string()),
        }
    }
}
