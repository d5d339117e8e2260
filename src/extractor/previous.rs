//! Previous-outcome window and n-gram features.
//!
//! For the outcomes produced so far `[A, B, C, D]`, the default configuration
//! emits `PreviousOutcome_L1=D`, `PreviousOutcome_L2=C`,
//! `PreviousOutcome_L3=B`, the bigram `D_C` and the trigram `D_C_B`.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::OutcomeFeatureExtractor;
use crate::config::{ConfigError, ConfigResult};
use crate::feature::Feature;

pub const PARAM_MOST_RECENT_OUTCOME: &str = "most_recent_outcome";
pub const PARAM_LEAST_RECENT_OUTCOME: &str = "least_recent_outcome";

const WINDOW_FEATURE: &str = "PreviousOutcome";
const NGRAM_FEATURE: &str = "PreviousOutcomes";

/// Which earlier outcomes become features
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviousOutcomeConfig {
    /// Offset of the most recent outcome to include; 1 is the immediately
    /// preceding position (default: 1).
    #[serde(default = "default_most_recent")]
    pub most_recent_outcome: usize,

    /// Offset of the least recent outcome to include (default: 3).
    #[serde(default = "default_least_recent")]
    pub least_recent_outcome: usize,

    /// Emit the last two outcomes as one feature (default: true).
    #[serde(default = "default_true")]
    pub use_bigram: bool,

    /// Emit the last three outcomes as one feature (default: true).
    #[serde(default = "default_true")]
    pub use_trigram: bool,

    /// Emit the last four outcomes as one feature (default: false).
    #[serde(default)]
    pub use_4gram: bool,
}

fn default_most_recent() -> usize {
    1
}

fn default_least_recent() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Default for PreviousOutcomeConfig {
    fn default() -> Self {
        Self {
            most_recent_outcome: default_most_recent(),
            least_recent_outcome: default_least_recent(),
            use_bigram: true,
            use_trigram: true,
            use_4gram: false,
        }
    }
}

impl PreviousOutcomeConfig {
    /// Only the immediately preceding outcome, no n-grams
    pub fn first_order() -> Self {
        Self {
            most_recent_outcome: 1,
            least_recent_outcome: 1,
            use_bigram: false,
            use_trigram: false,
            use_4gram: false,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.most_recent_outcome < 1 {
            return Err(ConfigError::parameter_less_than(
                PARAM_MOST_RECENT_OUTCOME,
                1,
                self.most_recent_outcome,
            ));
        }
        if self.least_recent_outcome < self.most_recent_outcome {
            return Err(ConfigError::parameter_less_than(
                PARAM_LEAST_RECENT_OUTCOME,
                self.most_recent_outcome,
                self.least_recent_outcome,
            ));
        }
        Ok(())
    }

    fn ngram_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        [(2, self.use_bigram), (3, self.use_trigram), (4, self.use_4gram)]
            .into_iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(n, _)| n)
    }
}

/// Emits earlier outcomes (rendered with `Display`) as features
#[derive(Debug, Clone)]
pub struct PreviousOutcomeExtractor {
    config: PreviousOutcomeConfig,
}

impl PreviousOutcomeExtractor {
    pub fn new(config: PreviousOutcomeConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Extractor for the immediately preceding outcome only
    pub fn first_order() -> Self {
        Self {
            config: PreviousOutcomeConfig::first_order(),
        }
    }

    pub fn config(&self) -> &PreviousOutcomeConfig {
        &self.config
    }
}

impl Default for PreviousOutcomeExtractor {
    fn default() -> Self {
        Self {
            config: PreviousOutcomeConfig::default(),
        }
    }
}

impl<O: Display> OutcomeFeatureExtractor<O> for PreviousOutcomeExtractor {
    fn extract(&self, history: &[O]) -> Vec<Feature> {
        let len = history.len();
        let mut features = Vec::new();

        for offset in self.config.most_recent_outcome..=self.config.least_recent_outcome {
            if offset > len {
                break;
            }
            features.push(Feature::new(
                format!("{}_L{}", WINDOW_FEATURE, offset),
                history[len - offset].to_string(),
            ));
        }

        for n in self.config.ngram_sizes() {
            if len < n {
                continue;
            }
            // most recent first
            let value = history[len - n..]
                .iter()
                .rev()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("_");
            features.push(Feature::new(
                format!("{}_L1_{}gram_L2R", NGRAM_FEATURE, n),
                value,
            ));
        }

        features
    }

    fn history_window(&self) -> Option<usize> {
        let longest_ngram = self.config.ngram_sizes().max().unwrap_or(0);
        Some(self.config.least_recent_outcome.max(longest_ngram))
    }
}
