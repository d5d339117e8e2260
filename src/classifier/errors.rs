//! # Classifier Errors

use thiserror::Error;

/// Result type for classifier operations
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Failures reported by a classifier collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    #[error("Classifier failed: {0}")]
    Failed(String),

    #[error("Unknown outcome: {0}")]
    UnknownOutcome(String),
}
