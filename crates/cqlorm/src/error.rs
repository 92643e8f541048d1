//! Error types for cqlorm

use thiserror::Error;

/// Result type alias for cqlorm operations
pub type CqlResult<T> = Result<T, CqlError>;

/// Error types for statement building, diffing and execution hand-off
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CqlError {
    /// A statement was rendered without one of its required parts
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Pieces were composed in a way that cannot produce valid CQL
    #[error("Malformed composition: {0}")]
    Malformed(String),

    /// Error reported by the execution layer
    #[error("Client error: {0}")]
    Client(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl CqlError {
    /// Create a missing field error
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    /// Create a malformed composition error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Create a client error
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client(message.into())
    }

    /// Check if this is a missing field error
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }

    /// Check if this is a malformed composition error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}
