//! Decoder error types
//!
//! Error codes:
//! - SEQ_CONFIG_INVALID (ERROR): rejected at construction
//! - SEQ_SCORING_UNSUPPORTED (ERROR): beam search over a classify-only classifier
//! - SEQ_INVARIANT_VIOLATION (FATAL): the classifier broke its contract
//! - SEQ_CLASSIFIER_FAILED (ERROR): the classifier reported a failure
//!
//! None of them is retried. A failed decode returns no partial result.

use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::config::ConfigError;
use crate::observability::Severity;

/// Result type for decoder operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decoder errors
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "Classifier cannot score outcome distributions, which '{parameter}' = {beam_width} \
         requires; set '{parameter}' to 1 to decode greedily with this classifier"
    )]
    UnsupportedScoring {
        parameter: &'static str,
        beam_width: usize,
    },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Classifier failed at position {position}: {source}")]
    Classifier {
        position: usize,
        #[source]
        source: ClassifierError,
    },
}

impl DecodeError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Config(_) => "SEQ_CONFIG_INVALID",
            DecodeError::UnsupportedScoring { .. } => "SEQ_SCORING_UNSUPPORTED",
            DecodeError::InvariantViolation(_) => "SEQ_INVARIANT_VIOLATION",
            DecodeError::Classifier { .. } => "SEQ_CLASSIFIER_FAILED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DecodeError::InvariantViolation(_) => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// True when the error signals a defect in a collaborator
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    pub(crate) fn classifier(position: usize, source: ClassifierError) -> Self {
        DecodeError::Classifier { position, source }
    }
}
