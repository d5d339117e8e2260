//! Shared fixtures for the decoder suites.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;
use seqbeam::observability::Logger;
use seqbeam::{
    BeamDecoder, Classifier, ClassifierError, ClassifierResult, CombinePolicy, DecoderConfig,
    ExtractorChain, Feature, FeatureValue, FeatureVector, OutcomeFeatureExtractor,
    ScoredOutcomes, ScoringClassifier,
};

/// Feature emitted by `PreviousOutcomeExtractor::first_order()`
pub const PREVIOUS: &str = "PreviousOutcome_L1";

/// Feature emitted by [`full_history`]
pub const HISTORY: &str = "History";

// =============================================================================
// Table classifier
// =============================================================================

/// Looks scores up by (position, value of one context feature).
///
/// Counts its own calls so suites can check exactly what the decoder asked for.
pub struct TableClassifier {
    context_feature: Option<&'static str>,
    rows: HashMap<(usize, String), Vec<(String, f64)>>,
    scoring: bool,
    classify_calls: Cell<usize>,
    score_calls: Cell<usize>,
}

impl TableClassifier {
    /// Rows selected by position only
    pub fn position_only() -> Self {
        Self {
            context_feature: None,
            rows: HashMap::new(),
            scoring: true,
            classify_calls: Cell::new(0),
            score_calls: Cell::new(0),
        }
    }

    /// Rows selected by position and the value of `context_feature`
    /// ("" when the feature is absent, as at position 0)
    pub fn keyed_by(context_feature: &'static str) -> Self {
        Self {
            context_feature: Some(context_feature),
            ..Self::position_only()
        }
    }

    pub fn row(mut self, position: usize, context: &str, scores: &[(&str, f64)]) -> Self {
        self.rows.insert(
            (position, context.to_string()),
            scores.iter().map(|(o, s)| (o.to_string(), *s)).collect(),
        );
        self
    }

    /// Hides the distribution capability
    pub fn without_scoring(mut self) -> Self {
        self.scoring = false;
        self
    }

    /// Same table with every score passed through `f`
    pub fn map_scores(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            context_feature: self.context_feature,
            rows: self
                .rows
                .iter()
                .map(|(key, row)| {
                    (
                        key.clone(),
                        row.iter().map(|(o, s)| (o.clone(), f(*s))).collect(),
                    )
                })
                .collect(),
            scoring: self.scoring,
            classify_calls: Cell::new(0),
            score_calls: Cell::new(0),
        }
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.get()
    }

    pub fn score_calls(&self) -> usize {
        self.score_calls.get()
    }

    pub fn reset_calls(&self) {
        self.classify_calls.set(0);
        self.score_calls.set(0);
    }

    fn lookup(&self, features: &[Feature]) -> ClassifierResult<ScoredOutcomes<String>> {
        let position = match Feature::find(features, "position").map(|f| &f.value) {
            Some(FeatureValue::Integer(i)) => *i as usize,
            _ => return Err(ClassifierError::Failed("missing position feature".into())),
        };
        let context = self
            .context_feature
            .and_then(|name| Feature::find(features, name))
            .map(|f| f.value.to_string())
            .unwrap_or_default();

        let row = self.rows.get(&(position, context.clone())).ok_or_else(|| {
            ClassifierError::Failed(format!("no row for position {} after {:?}", position, context))
        })?;
        Ok(row.iter().cloned().collect())
    }
}

impl Classifier for TableClassifier {
    type Outcome = String;

    fn classify(&self, features: &[Feature]) -> ClassifierResult<String> {
        self.classify_calls.set(self.classify_calls.get() + 1);
        let scored = self.lookup(features)?;
        scored
            .best()
            .map(|(o, _)| o.clone())
            .ok_or_else(|| ClassifierError::Failed("empty row".into()))
    }

    fn as_scoring(&self) -> Option<&dyn ScoringClassifier<Outcome = String>> {
        if self.scoring {
            Some(self)
        } else {
            None
        }
    }
}

impl ScoringClassifier for TableClassifier {
    fn score(&self, features: &[Feature]) -> ClassifierResult<ScoredOutcomes<String>> {
        self.score_calls.set(self.score_calls.get() + 1);
        self.lookup(features)
    }
}

/// Same distribution at every position
pub struct ConstantScorer {
    pub scores: Vec<(&'static str, f64)>,
}

impl Classifier for ConstantScorer {
    type Outcome = String;

    fn classify(&self, _features: &[Feature]) -> ClassifierResult<String> {
        Err(ClassifierError::Failed("greedy not expected".into()))
    }

    fn as_scoring(&self) -> Option<&dyn ScoringClassifier<Outcome = String>> {
        Some(self)
    }
}

impl ScoringClassifier for ConstantScorer {
    fn score(&self, _features: &[Feature]) -> ClassifierResult<ScoredOutcomes<String>> {
        Ok(self
            .scores
            .iter()
            .map(|(o, s)| (o.to_string(), *s))
            .collect())
    }
}

// =============================================================================
// Inputs and extractors
// =============================================================================

/// One `position=i` feature vector per position
pub fn positions(length: usize) -> Vec<FeatureVector> {
    (0..length)
        .map(|i| vec![Feature::new("position", i)])
        .collect()
}

/// The whole history, oldest first, joined with "_"
pub fn full_history(history: &[String]) -> Vec<Feature> {
    if history.is_empty() {
        return Vec::new();
    }
    vec![Feature::new(HISTORY, history.join("_"))]
}

pub fn labels(outcomes: &[&str]) -> Vec<String> {
    outcomes.iter().map(|o| o.to_string()).collect()
}

/// Decoder with a silent logger
pub fn decoder<C: Classifier>(classifier: C, config: DecoderConfig) -> BeamDecoder<C> {
    BeamDecoder::new(classifier, &config)
        .unwrap()
        .with_logger(Logger::silent())
}

// =============================================================================
// Random tables and brute force
// =============================================================================

fn random_row<'a>(rng: &mut StdRng, alphabet: &[&'a str]) -> Vec<(&'a str, f64)> {
    alphabet
        .iter()
        .map(|o| (*o, rng.gen_range(0.01..1.0)))
        .collect()
}

/// First-order table: scores depend on the position and the previous outcome.
pub fn random_markov(rng: &mut StdRng, length: usize, alphabet: &[&str]) -> TableClassifier {
    let mut table = TableClassifier::keyed_by(PREVIOUS);
    let first = random_row(rng, alphabet);
    table = table.row(0, "", &first);
    for position in 1..length {
        for previous in alphabet {
            let row = random_row(rng, alphabet);
            table = table.row(position, previous, &row);
        }
    }
    table
}

/// Total score of `sequence`, built the way the beam decoder builds features:
/// base features only at position 0, base + extractor output afterwards.
pub fn sequence_score<C: ScoringClassifier<Outcome = String>>(
    classifier: &C,
    extractors: &ExtractorChain<String>,
    inputs: &[FeatureVector],
    sequence: &[String],
    policy: CombinePolicy,
) -> Option<f64> {
    let mut total = policy.identity();
    for (i, base) in inputs.iter().enumerate() {
        let features = if i == 0 {
            base.clone()
        } else {
            extractors.augment(base, &sequence[..i])
        };
        let scored = classifier.score(&features).ok()?;
        total = policy.combine(total, scored.get(&sequence[i])?);
    }
    Some(total)
}

/// Best-scoring sequence over every `alphabet^len` labelling.
pub fn brute_force<C: ScoringClassifier<Outcome = String>>(
    classifier: &C,
    extractors: &ExtractorChain<String>,
    inputs: &[FeatureVector],
    alphabet: &[&str],
    policy: CombinePolicy,
) -> Option<(Vec<String>, f64)> {
    let stages = vec![alphabet; inputs.len()];
    brute_force_staged(classifier, extractors, inputs, &stages, policy)
}

/// Best-scoring sequence drawing position `i` from `stages[i]`.
pub fn brute_force_staged<C: ScoringClassifier<Outcome = String>>(
    classifier: &C,
    extractors: &ExtractorChain<String>,
    inputs: &[FeatureVector],
    stages: &[&[&str]],
    policy: CombinePolicy,
) -> Option<(Vec<String>, f64)> {
    let mut best: Option<(Vec<String>, f64)> = None;
    for sequence in all_sequences(stages) {
        if let Some(score) = sequence_score(classifier, extractors, inputs, &sequence, policy) {
            if best.as_ref().map_or(true, |(_, b)| score > *b) {
                best = Some((sequence, score));
            }
        }
    }
    best
}

/// Cartesian product of the stages, in stage order
pub fn all_sequences(stages: &[&[&str]]) -> Vec<Vec<String>> {
    let mut sequences = vec![Vec::new()];
    for stage in stages {
        sequences = sequences
            .into_iter()
            .flat_map(|prefix: Vec<String>| {
                stage.iter().map(move |o| {
                    let mut next = prefix.clone();
                    next.push(o.to_string());
                    next
                })
            })
            .collect();
    }
    sequences
}

/// Chain holding a single extractor
pub fn chain(extractor: impl OutcomeFeatureExtractor<String> + 'static) -> ExtractorChain<String> {
    let mut chain = ExtractorChain::new();
    chain.push(extractor);
    chain
}
