//! Sequence decoder
//!
//! Turns one feature vector per position into one outcome per position,
//! keeping the labels globally consistent through outcome feature extractors
//! and a bounded beam of candidate paths.
//!
//! # Modes
//!
//! - `beam_width == 1`: greedy, one `classify` call per position
//! - `beam_width > 1`: approximate Viterbi, at most `beam_width` distribution
//!   queries per position
//!
//! # Determinism
//!
//! Equal scores are broken by outcome order, so the same inputs always
//! produce the same labels.

mod beam;
mod combine;
mod errors;
mod path;

pub use beam::BeamDecoder;
pub use combine::CombinePolicy;
pub use errors::{DecodeError, DecodeResult};
pub use path::Path;
