//! Error types for the MSC client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when the backend cannot be reached at all.
pub const CONNECTION_FAILED_MESSAGE: &str = "Lỗi kết nối đến server";

/// A shared error type for the whole client.
///
/// Every failure the client can observe (transport, backend-reported,
/// malformed payloads, local storage) is folded into one of these variants
/// so component boundaries can turn it into a renderable state value.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MscError {
    /// Transport-level failure (DNS, connection refused, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with `success: false` or a non-2xx status
    #[error("API error: {message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No usable credentials are available for an authenticated call
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Client-side input validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MscError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an Api error without an HTTP status
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
        }
    }

    /// Creates an Api error carrying the HTTP status code
    pub fn api_with_status(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
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

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if the backend reported the failure
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Api { status: Some(404), .. })
    }

    /// Check if this is an authentication failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
            || matches!(self, Self::Api { status: Some(401), .. })
    }

    /// Returns the text shown to a person for this failure.
    ///
    /// Backend-provided messages are passed through verbatim; transport
    /// failures collapse to the generic connection message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Validation(message) | Self::Unauthorized(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            Self::Network(_) => CONNECTION_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MscError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MscError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MscError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MscError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MscError>`.
pub type Result<T> = std::result::Result<T, MscError>;
