//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Unknown notification channel
    #[error("Invalid channel: {0}")]
    InvalidChannel(String),

    /// Unknown alert priority
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    /// Unknown emergency type
    #[error("Invalid emergency type: {0}")]
    InvalidEmergencyType(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
