//! # Configuration Errors
//!
//! Raised eagerly while building a decoder or an extractor. Never recoverable:
//! a component that fails validation is not constructed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parameter '{parameter}' must be at least {minimum}, but was {value}")]
    ParameterLessThan {
        parameter: &'static str,
        minimum: i64,
        value: i64,
    },

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Cannot read configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// `value` of `parameter` is below `minimum`
    pub fn parameter_less_than(parameter: &'static str, minimum: usize, value: usize) -> Self {
        ConfigError::ParameterLessThan {
            parameter,
            minimum: saturating_i64(minimum),
            value: saturating_i64(value),
        }
    }

    /// Name of the offending parameter, when the error is about one
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            ConfigError::ParameterLessThan { parameter, .. } => Some(*parameter),
            _ => None,
        }
    }
}

fn saturating_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
