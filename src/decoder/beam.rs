//! Bounded-width Viterbi decoding.
//!
//! For every position after the first, each surviving path is extended by
//! its own `beam_width` best outcomes; the candidates of all survivors are
//! then merged by outcome, keeping the best-scoring candidate per outcome.
//! The merge collapses same-outcome candidates from different predecessors,
//! so each position costs at most one distribution query per survivor.
//!
//! The per-survivor top-K happens *before* the merge. Pruning after a full
//! expansion reaches different sequences under the same width.

use std::borrow::Cow;
use std::collections::hash_map::{Entry, HashMap};
use std::rc::Rc;

use super::combine::CombinePolicy;
use super::errors::{DecodeError, DecodeResult};
use super::path::Path;
use crate::classifier::{rank, Classifier, ScoredOutcomes, ScoringClassifier};
use crate::config::{DecoderConfig, PARAM_BEAM_WIDTH, PARAM_COMBINE_BY_SUM};
use crate::extractor::{ExtractorChain, OutcomeFeatureExtractor};
use crate::feature::{Feature, FeatureVector};
use crate::observability::{DecodeEvent, DecodeMetrics, DecodeScope, Logger, Severity};

type Survivors<O> = Vec<Rc<Path<O>>>;

/// Labels a whole sequence at once, searching a bounded beam of candidate
/// label sequences.
///
/// With `beam_width == 1` decoding is greedy and only needs
/// [`Classifier::classify`]; wider beams need a classifier that exposes
/// [`ScoringClassifier`] through [`Classifier::as_scoring`].
pub struct BeamDecoder<C: Classifier> {
    classifier: C,
    extractors: ExtractorChain<C::Outcome>,
    beam_width: usize,
    greedy: bool,
    policy: CombinePolicy,
    logger: Logger,
    metrics: DecodeMetrics,
}

impl<C: Classifier> BeamDecoder<C> {
    /// Validates `config` and builds a decoder with no outcome feature extractors.
    ///
    /// Scoring support is not checked here; a classify-only classifier is
    /// only rejected when a wide beam actually asks it for a distribution.
    pub fn new(classifier: C, config: &DecoderConfig) -> DecodeResult<Self> {
        config.validate()?;
        Ok(Self {
            classifier,
            extractors: ExtractorChain::new(),
            beam_width: config.beam_width,
            greedy: config.is_greedy(),
            policy: config.combine_policy(),
            logger: Logger::stderr(config.log_level),
            metrics: DecodeMetrics::new(),
        })
    }

    /// Adds an extractor after the ones already configured.
    ///
    /// Each survivor's history is collected once per position. Extractors
    /// that report a [`OutcomeFeatureExtractor::history_window`] keep that
    /// bounded; one unbounded extractor makes every position walk the whole
    /// path.
    pub fn with_extractor(
        mut self,
        extractor: impl OutcomeFeatureExtractor<C::Outcome> + 'static,
    ) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Replaces the extractor chain
    pub fn with_extractors(mut self, extractors: ExtractorChain<C::Outcome>) -> Self {
        self.extractors = extractors;
        self
    }

    /// Replaces the stderr logger built from the config
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn beam_width(&self) -> usize {
        self.beam_width
    }

    pub fn policy(&self) -> CombinePolicy {
        self.policy
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn extractors(&self) -> &ExtractorChain<C::Outcome> {
        &self.extractors
    }

    pub fn metrics(&self) -> &DecodeMetrics {
        &self.metrics
    }

    /// Labels every position of `sequence`.
    ///
    /// Returns one outcome per feature vector, or an error and nothing else.
    pub fn decode(&self, sequence: &[FeatureVector]) -> DecodeResult<Vec<C::Outcome>> {
        self.metrics.increment_decodes_started();
        let scope = DecodeScope::new(
            &self.logger,
            &[
                ("positions", sequence.len().to_string()),
                (PARAM_BEAM_WIDTH, self.beam_width.to_string()),
                (PARAM_COMBINE_BY_SUM, (self.policy == CombinePolicy::Sum).to_string()),
            ],
        );

        let result = if self.greedy {
            self.decode_greedy(sequence)
        } else {
            self.decode_beam(sequence)
        };

        match result {
            Ok(outcomes) => {
                self.metrics.increment_decodes_completed();
                scope.complete(&[]);
                Ok(outcomes)
            }
            Err(err) => {
                self.metrics.increment_decodes_failed();
                scope.fail(err.severity(), err.code(), &err.to_string());
                Err(err)
            }
        }
    }

    fn decode_greedy(&self, sequence: &[FeatureVector]) -> DecodeResult<Vec<C::Outcome>> {
        let mut outcomes = Vec::with_capacity(sequence.len());
        for (position, base) in sequence.iter().enumerate() {
            let features = self
                .extractors
                .augment(base, self.extractors.recent(&outcomes));
            self.metrics.increment_classify_calls();
            let outcome = self
                .classifier
                .classify(&features)
                .map_err(|e| DecodeError::classifier(position, e))?;

            if self.logger.enabled(Severity::Trace) {
                self.logger.trace(
                    DecodeEvent::GreedyStep,
                    &[
                        ("position", position.to_string().as_str()),
                        ("outcome", format!("{:?}", outcome).as_str()),
                    ],
                );
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    fn decode_beam(&self, sequence: &[FeatureVector]) -> DecodeResult<Vec<C::Outcome>> {
        let Some((first, rest)) = sequence.split_first() else {
            return Ok(Vec::new());
        };
        let scorer = self.scorer()?;

        // position 0: no history, so no extractor features
        let seeded = self.score(scorer, 0, first)?;
        let mut survivors: Survivors<C::Outcome> = seeded
            .top(self.beam_width)
            .into_iter()
            .map(|(outcome, score)| Path::root(outcome, score))
            .collect();
        self.metrics.add_candidates_scored(survivors.len() as u64);
        self.trace_survivors(DecodeEvent::BeamSeeded, 0, &survivors, 0);

        for (offset, base) in rest.iter().enumerate() {
            survivors = self.advance(scorer, offset + 1, base, &survivors)?;
        }

        // survivors are kept best-first
        survivors
            .first()
            .map(|best| best.history())
            .ok_or_else(|| DecodeError::InvariantViolation("beam emptied during decoding".into()))
    }

    /// Expands every survivor at `position` and merges the candidates by outcome.
    fn advance(
        &self,
        scorer: &dyn ScoringClassifier<Outcome = C::Outcome>,
        position: usize,
        base: &[Feature],
        survivors: &[Rc<Path<C::Outcome>>],
    ) -> DecodeResult<Survivors<C::Outcome>> {
        let mut winners: HashMap<C::Outcome, (f64, &Rc<Path<C::Outcome>>)> =
            HashMap::with_capacity(self.beam_width);
        let mut candidates = 0usize;
        let window = self.extractors.history_window();

        for path in survivors {
            let features: Cow<'_, [Feature]> = if self.extractors.is_empty() {
                Cow::Borrowed(base)
            } else {
                let history = match window {
                    Some(limit) => path.recent_history(limit),
                    None => path.history(),
                };
                Cow::Owned(self.extractors.augment(base, &history))
            };
            let scored = self.score(scorer, position, &features)?;

            for (outcome, outcome_score) in scored.top(self.beam_width) {
                let score = self.policy.combine(path.score(), outcome_score);
                if score.is_nan() {
                    return Err(DecodeError::InvariantViolation(format!(
                        "combining path score {} with score {} of {:?} by {} gives NaN at position {}",
                        path.score(),
                        outcome_score,
                        outcome,
                        self.policy,
                        position
                    )));
                }
                candidates += 1;

                // ties keep the candidate from the better survivor
                match winners.entry(outcome) {
                    Entry::Occupied(mut entry) => {
                        if score > entry.get().0 {
                            entry.insert((score, path));
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert((score, path));
                    }
                }
            }
        }

        let mut next: Survivors<C::Outcome> = winners
            .into_iter()
            .map(|(outcome, (score, parent))| Path::extend(parent, outcome, score))
            .collect();
        next.sort_by(|a, b| rank(a.outcome(), a.score(), b.outcome(), b.score()));
        // distinct outcomes across survivors can outnumber the beam
        next.truncate(self.beam_width);

        self.metrics.add_candidates_scored(candidates as u64);
        self.metrics
            .add_candidates_discarded((candidates - next.len()) as u64);
        self.trace_survivors(
            DecodeEvent::BeamMerged,
            position,
            &next,
            candidates - next.len(),
        );
        Ok(next)
    }

    fn scorer(&self) -> DecodeResult<&dyn ScoringClassifier<Outcome = C::Outcome>> {
        self.classifier
            .as_scoring()
            .ok_or(DecodeError::UnsupportedScoring {
                parameter: PARAM_BEAM_WIDTH,
                beam_width: self.beam_width,
            })
    }

    /// One distribution query, with the non-empty / no-NaN contract enforced.
    fn score(
        &self,
        scorer: &dyn ScoringClassifier<Outcome = C::Outcome>,
        position: usize,
        features: &[Feature],
    ) -> DecodeResult<ScoredOutcomes<C::Outcome>> {
        self.metrics.increment_score_calls();
        let scored = scorer
            .score(features)
            .map_err(|e| DecodeError::classifier(position, e))?;

        if scored.is_empty() {
            return Err(DecodeError::InvariantViolation(format!(
                "expected at least one scored outcome at position {}, found none",
                position
            )));
        }
        if let Some(outcome) = scored.first_nan() {
            return Err(DecodeError::InvariantViolation(format!(
                "outcome {:?} scored NaN at position {}",
                outcome, position
            )));
        }
        Ok(scored)
    }

    fn trace_survivors(
        &self,
        event: DecodeEvent,
        position: usize,
        survivors: &[Rc<Path<C::Outcome>>],
        discarded: usize,
    ) {
        if !self.logger.enabled(Severity::Trace) {
            return;
        }
        let best = survivors
            .first()
            .map(|p| format!("{:?}={}", p.outcome(), p.score()))
            .unwrap_or_default();
        self.logger.trace(
            event,
            &[
                ("position", position.to_string().as_str()),
                ("survivors", survivors.len().to_string().as_str()),
                ("discarded", discarded.to_string().as_str()),
                ("best", best.as_str()),
            ],
        );
    }
}
