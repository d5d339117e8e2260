//! Decoder configuration
//!
//! Language-neutral options of the decoder, with per-field defaults so that
//! partial JSON documents are accepted:
//!
//! ```json
//! { "beam_width": 4, "combine_by_sum": true, "log_level": "info" }
//! ```

mod errors;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decoder::CombinePolicy;
use crate::observability::Severity;

pub use errors::{ConfigError, ConfigResult};

/// Name of the beam width parameter in errors and documents
pub const PARAM_BEAM_WIDTH: &str = "beam_width";

/// Name of the combination policy flag in errors and documents
pub const PARAM_COMBINE_BY_SUM: &str = "combine_by_sum";

/// Decoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoderConfig {
    /// Maximum number of candidate paths kept per position (default: 1, greedy).
    ///
    /// Should be at least the number of outcomes possible at any position for
    /// the search to find the best-scoring sequence. Values above 1 require a
    /// classifier that can score full distributions.
    #[serde(default = "default_beam_width")]
    pub beam_width: usize,

    /// Sum per-position scores instead of multiplying them (default: false).
    #[serde(default)]
    pub combine_by_sum: bool,

    /// Minimum severity written to the decoder log (default: "warn").
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_beam_width() -> usize {
    1
}

fn default_log_level() -> Severity {
    Severity::Warn
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            beam_width: default_beam_width(),
            combine_by_sum: false,
            log_level: default_log_level(),
        }
    }
}

impl DecoderConfig {
    /// Greedy decoding, multiplicative scores
    pub fn greedy() -> Self {
        Self::default()
    }

    /// Config with the given beam width
    pub fn with_beam_width(beam_width: usize) -> Self {
        Self {
            beam_width,
            ..Self::default()
        }
    }

    /// Switch to additive score combination
    pub fn with_sum(mut self) -> Self {
        self.combine_by_sum = true;
        self
    }

    pub fn with_log_level(mut self, log_level: Severity) -> Self {
        self.log_level = log_level;
        self
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Checks `beam_width >= 1`.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.beam_width < 1 {
            return Err(ConfigError::parameter_less_than(
                PARAM_BEAM_WIDTH,
                1,
                self.beam_width,
            ));
        }
        Ok(())
    }

    pub fn is_greedy(&self) -> bool {
        self.beam_width == 1
    }

    pub fn combine_policy(&self) -> CombinePolicy {
        CombinePolicy::from_sum_flag(self.combine_by_sum)
    }
}
