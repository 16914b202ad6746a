//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::ClassId;

/// Domain errors represent violations of the hierarchy export rules.
/// These are independent of how the provider is reached.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("organism not found: {0}")]
    OrganismNotFound(String),

    #[error("provider unavailable during {operation}: {message}")]
    ProviderUnavailable { operation: String, message: String },

    #[error("malformed provider data in {context}: {message}")]
    MalformedProviderData { context: String, message: String },

    #[error("cycle detected in classification at class {0}")]
    CyclicClassification(ClassId),

    #[error("classification nested deeper than {max_depth} levels at class {class_id}")]
    MaxDepthExceeded { max_depth: usize, class_id: ClassId },
}
