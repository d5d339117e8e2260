//! Outcome feature extractors
//!
//! An outcome feature extractor turns the labels already assigned to earlier
//! positions into extra features for the current one, which is how
//! label-to-label dependencies reach an otherwise position-local classifier.
//!
//! Extractors must be pure: the decoder calls them many times per position,
//! once for every alternative history still on the beam.

mod previous;

use crate::feature::Feature;

pub use previous::{
    PreviousOutcomeConfig, PreviousOutcomeExtractor, PARAM_LEAST_RECENT_OUTCOME,
    PARAM_MOST_RECENT_OUTCOME,
};

/// Derives features from the outcomes of earlier positions
pub trait OutcomeFeatureExtractor<O> {
    /// `history` is oldest first and empty at position 0.
    fn extract(&self, history: &[O]) -> Vec<Feature>;

    /// Number of most recent outcomes `extract` reads, or `None` if it may
    /// read the whole history. With a window the decoder passes only that
    /// suffix of each history.
    fn history_window(&self) -> Option<usize> {
        None
    }
}

impl<O, F> OutcomeFeatureExtractor<O> for F
where
    F: Fn(&[O]) -> Vec<Feature>,
{
    fn extract(&self, history: &[O]) -> Vec<Feature> {
        self(history)
    }
}

/// Extractors applied in configured order, outputs concatenated
pub struct ExtractorChain<O> {
    extractors: Vec<Box<dyn OutcomeFeatureExtractor<O>>>,
}

impl<O> ExtractorChain<O> {
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Appends an extractor; it runs after the ones already present
    pub fn push(&mut self, extractor: impl OutcomeFeatureExtractor<O> + 'static) {
        self.extractors.push(Box::new(extractor));
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Widest window of any extractor; `None` once one of them is unbounded.
    pub fn history_window(&self) -> Option<usize> {
        self.extractors
            .iter()
            .try_fold(0, |widest, extractor| {
                extractor.history_window().map(|n| widest.max(n))
            })
    }

    /// The part of `history` the chain can read
    pub fn recent<'a>(&self, history: &'a [O]) -> &'a [O] {
        match self.history_window() {
            Some(n) => &history[history.len().saturating_sub(n)..],
            None => history,
        }
    }

    /// Concatenated output of every extractor over `history`
    pub fn extract(&self, history: &[O]) -> Vec<Feature> {
        self.extractors
            .iter()
            .flat_map(|extractor| extractor.extract(history))
            .collect()
    }

    /// `base` followed by the chain's output over `history`
    pub fn augment(&self, base: &[Feature], history: &[O]) -> Vec<Feature> {
        let mut features = base.to_vec();
        for extractor in &self.extractors {
            features.extend(extractor.extract(history));
        }
        features
    }
}

impl<O> Default for ExtractorChain<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> std::fmt::Debug for ExtractorChain<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorChain")
            .field("extractors", &self.extractors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last(history: &[&'static str]) -> Vec<Feature> {
        history
            .last()
            .map(|o| vec![Feature::new("last", *o)])
            .unwrap_or_default()
    }

    fn length(history: &[&'static str]) -> Vec<Feature> {
        vec![Feature::new("length", history.len())]
    }

    #[test]
    fn test_closures_are_extractors() {
        let extractor = |history: &[&'static str]| vec![Feature::new("n", history.len())];
        let history: &[&'static str] = &["A", "B"];
        assert_eq!(extractor.extract(history), vec![Feature::new("n", 2usize)]);
    }

    #[test]
    fn test_chain_preserves_order() {
        let mut chain: ExtractorChain<&'static str> = ExtractorChain::new();
        chain.push(length);
        chain.push(last);

        let features = chain.extract(&["A", "B"]);
        assert_eq!(
            features,
            vec![Feature::new("length", 2usize), Feature::new("last", "B")]
        );
    }

    #[test]
    fn test_augment_appends_after_base() {
        let mut chain: ExtractorChain<&'static str> = ExtractorChain::new();
        chain.push(last);

        let base = vec![Feature::new("word", "dog")];
        let features = chain.augment(&base, &["DT"]);
        assert_eq!(features[0], Feature::new("word", "dog"));
        assert_eq!(features[1], Feature::new("last", "DT"));

        // empty history at position 0
        assert_eq!(chain.augment(&base, &[]), base);
    }

    #[test]
    fn test_empty_chain() {
        let chain: ExtractorChain<&str> = ExtractorChain::default();
        assert!(chain.is_empty());
        assert!(chain.extract(&["A"]).is_empty());
        assert_eq!(chain.history_window(), Some(0));
    }

    struct LastN(usize);

    impl OutcomeFeatureExtractor<&'static str> for LastN {
        fn extract(&self, history: &[&'static str]) -> Vec<Feature> {
            let start = history.len().saturating_sub(self.0);
            vec![Feature::new("tail", history[start..].join("_"))]
        }

        fn history_window(&self) -> Option<usize> {
            Some(self.0)
        }
    }

    #[test]
    fn test_chain_window_is_widest_member() {
        let mut chain: ExtractorChain<&'static str> = ExtractorChain::new();
        chain.push(LastN(1));
        chain.push(LastN(3));
        assert_eq!(chain.history_window(), Some(3));
        assert_eq!(chain.recent(&["A", "B", "C", "D", "E"]), &["C", "D", "E"]);
        assert_eq!(chain.recent(&["A"]), &["A"]);

        // closures may read everything
        chain.push(length);
        assert_eq!(chain.history_window(), None);
        assert_eq!(chain.recent(&["A", "B", "C", "D", "E"]).len(), 5);
    }

    #[test]
    fn test_windowed_suffix_gives_same_features() {
        let mut chain: ExtractorChain<&'static str> = ExtractorChain::new();
        chain.push(LastN(2));
        let history = ["A", "B", "C", "D"];
        assert_eq!(chain.extract(chain.recent(&history)), chain.extract(&history));
    }
}
