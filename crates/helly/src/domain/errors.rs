//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// No confident team member match for a piece of feedback
    #[error("Unresolved entity: {0}")]
    UnresolvedEntity(String),

    /// Persistence layer unavailable or rejected the operation
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// AI service unreachable or returned an error
    #[error("AI gateway unavailable: {0}")]
    GatewayUnavailable(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
