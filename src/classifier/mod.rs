//! Classifier capabilities consumed by the decoder
//!
//! Classifiers come in two capability levels:
//!
//! - [`Classifier`]: single-best classification. Always required.
//! - [`ScoringClassifier`]: full outcome → score distributions. Optional,
//!   discovered at runtime through [`Classifier::as_scoring`].
//!
//! The decoder asks for the stronger capability only when its beam width is
//! greater than one, and reports its absence as a typed error.

mod errors;
mod scored;

use std::fmt::Debug;
use std::hash::Hash;

use crate::feature::Feature;

pub use errors::{ClassifierError, ClassifierResult};
pub use scored::ScoredOutcomes;
pub(crate) use scored::rank;

/// A label assigned to one sequence position.
///
/// Blanket-implemented; `Ord` is only used to break score ties deterministically.
pub trait Outcome: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Outcome for T {}

/// Single-best classification of one feature vector
pub trait Classifier {
    type Outcome: Outcome;

    /// Returns the best outcome for `features`
    fn classify(&self, features: &[Feature]) -> ClassifierResult<Self::Outcome>;

    /// Returns the distribution-scoring view of this classifier, if it has one.
    ///
    /// Implementations that also implement [`ScoringClassifier`] return
    /// `Some(self)`.
    fn as_scoring(&self) -> Option<&dyn ScoringClassifier<Outcome = Self::Outcome>> {
        None
    }
}

/// A classifier that can score every outcome, not just pick the best one
pub trait ScoringClassifier: Classifier {
    /// Scores all candidate outcomes for `features`. Must not be empty.
    fn score(&self, features: &[Feature]) -> ClassifierResult<ScoredOutcomes<Self::Outcome>>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    type Outcome = C::Outcome;

    fn classify(&self, features: &[Feature]) -> ClassifierResult<Self::Outcome> {
        (**self).classify(features)
    }

    fn as_scoring(&self) -> Option<&dyn ScoringClassifier<Outcome = Self::Outcome>> {
        (**self).as_scoring()
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    type Outcome = C::Outcome;

    fn classify(&self, features: &[Feature]) -> ClassifierResult<Self::Outcome> {
        (**self).classify(features)
    }

    fn as_scoring(&self) -> Option<&dyn ScoringClassifier<Outcome = Self::Outcome>> {
        (**self).as_scoring()
    }
}
