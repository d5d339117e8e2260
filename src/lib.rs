//! seqbeam - bounded-width Viterbi decoding for sequence classification
//!
//! A per-item classifier labels each position of a sequence; the decoder
//! chains those decisions into one globally consistent label sequence,
//! feeding earlier outcomes back in as features and keeping a bounded beam
//! of candidate label sequences.
//!
//! ```ignore
//! use seqbeam::{BeamDecoder, DecoderConfig, PreviousOutcomeExtractor};
//!
//! let decoder = BeamDecoder::new(classifier, &DecoderConfig::with_beam_width(4))?
//!     .with_extractor(PreviousOutcomeExtractor::default());
//! let labels = decoder.decode(&feature_vectors)?;
//! ```

pub mod classifier;
pub mod config;
pub mod decoder;
pub mod extractor;
pub mod feature;
pub mod observability;

pub use classifier::{
    Classifier, ClassifierError, ClassifierResult, Outcome, ScoredOutcomes, ScoringClassifier,
};
pub use config::{ConfigError, ConfigResult, DecoderConfig};
pub use decoder::{BeamDecoder, CombinePolicy, DecodeError, DecodeResult, Path};
pub use extractor::{
    ExtractorChain, OutcomeFeatureExtractor, PreviousOutcomeConfig, PreviousOutcomeExtractor,
};
pub use feature::{Feature, FeatureValue, FeatureVector};
