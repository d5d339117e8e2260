//! Score combination policies.

use std::fmt;

/// How a path's score absorbs the score of its next outcome.
///
/// The decoder never converts between domains: `Product` expects
/// probabilities in (0, 1], `Sum` expects log-domain (or otherwise additive)
/// scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombinePolicy {
    /// Accumulate by addition
    Sum,
    /// Accumulate by multiplication
    #[default]
    Product,
}

impl CombinePolicy {
    pub fn from_sum_flag(combine_by_sum: bool) -> Self {
        if combine_by_sum {
            CombinePolicy::Sum
        } else {
            CombinePolicy::Product
        }
    }

    pub fn combine(&self, path_score: f64, outcome_score: f64) -> f64 {
        match self {
            CombinePolicy::Sum => path_score + outcome_score,
            CombinePolicy::Product => path_score * outcome_score,
        }
    }

    /// Score of an empty path under this policy
    pub fn identity(&self) -> f64 {
        match self {
            CombinePolicy::Sum => 0.0,
            CombinePolicy::Product => 1.0,
        }
    }

    /// Folds a sequence of per-position scores
    pub fn total(&self, scores: impl IntoIterator<Item = f64>) -> f64 {
        scores
            .into_iter()
            .fold(self.identity(), |acc, s| self.combine(acc, s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CombinePolicy::Sum => "sum",
            CombinePolicy::Product => "product",
        }
    }
}

impl fmt::Display for CombinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
