//! Error types for the Swapmarket client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Swapmarket client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Failures are always carried
/// by return value; no collaborator throws across an operation boundary.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MarketError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Remote API rejected or failed a request
    #[error("API error{}: {message}", .status_code.map(|s| format!(" ({s})")).unwrap_or_default())]
    Api {
        status_code: Option<u16>,
        message: String,
    },

    /// The bearer credential was rejected by the server (401-equivalent)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Persistent credential storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Local precondition check failed before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Api error without a status code
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates an Api error carrying the HTTP status
    pub fn api_with_status(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an Api error
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Check if this is a Storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The user-facing message for this error.
    ///
    /// API errors surface the server's message verbatim when it was
    /// available; everything else falls back to the Display form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Unauthorized(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for MarketError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MarketError>`.
pub type Result<T> = std::result::Result<T, MarketError>;
