//! Outcome → score distributions and deterministic top-K selection.

use std::cmp::Ordering;
use std::collections::hash_map::{self, HashMap};

use super::Outcome;

/// Scores for every outcome a classifier considers possible at one position.
///
/// Interpretation of the scores (probabilities vs. log-domain) is up to the
/// caller and must match the decoder's combination policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOutcomes<O: Outcome> {
    scores: HashMap<O, f64>,
}

impl<O: Outcome> ScoredOutcomes<O> {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    /// Sets the score of `outcome`, returning the previous one
    pub fn insert(&mut self, outcome: O, score: f64) -> Option<f64> {
        self.scores.insert(outcome, score)
    }

    pub fn get(&self, outcome: &O) -> Option<f64> {
        self.scores.get(outcome).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterates in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&O, f64)> + '_ {
        self.scores.iter().map(|(o, s)| (o, *s))
    }

    /// First outcome whose score is NaN, if any
    pub fn first_nan(&self) -> Option<&O> {
        self.scores
            .iter()
            .filter(|(_, s)| s.is_nan())
            .map(|(o, _)| o)
            .min()
    }

    /// The `k` best outcomes, best first.
    ///
    /// Ordered by score descending, then by outcome ascending, so equal
    /// scores always resolve the same way.
    pub fn top(&self, k: usize) -> Vec<(O, f64)> {
        let mut ranked: Vec<(O, f64)> = self
            .scores
            .iter()
            .map(|(o, s)| (o.clone(), *s))
            .collect();
        ranked.sort_by(|a, b| rank(&a.0, a.1, &b.0, b.1));
        ranked.truncate(k);
        ranked
    }

    /// The single best outcome under the same ordering as [`top`](Self::top)
    pub fn best(&self) -> Option<(&O, f64)> {
        self.scores
            .iter()
            .min_by(|a, b| rank(a.0, *a.1, b.0, *b.1))
            .map(|(o, s)| (o, *s))
    }
}

/// Higher score first, then the smaller outcome.
pub(crate) fn rank<O: Ord>(a: &O, a_score: f64, b: &O, b_score: f64) -> Ordering {
    b_score.total_cmp(&a_score).then_with(|| a.cmp(b))
}

impl<O: Outcome> Default for ScoredOutcomes<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Outcome> FromIterator<(O, f64)> for ScoredOutcomes<O> {
    fn from_iter<I: IntoIterator<Item = (O, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

impl<O: Outcome> IntoIterator for ScoredOutcomes<O> {
    type Item = (O, f64);
    type IntoIter = hash_map::IntoIter<O, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.into_iter()
    }
}
