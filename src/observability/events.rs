//! Observability events for the decoder
//!
//! Every line the decoder logs carries exactly one of these events.
//! Events are explicit and typed.

use std::fmt;

/// Observable events emitted while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeEvent {
    // Decode lifecycle
    /// A decode call started
    DecodeBegin,
    /// A decode call produced a complete label sequence
    DecodeComplete,
    /// A decode call failed (no partial result)
    DecodeFailed,

    // Beam mode
    /// Position 0 seeded the survivor set
    BeamSeeded,
    /// Candidates of one position were merged into the next survivor set
    BeamMerged,

    // Greedy mode
    /// One position was labelled by single-best classification
    GreedyStep,
}

impl DecodeEvent {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeEvent::DecodeBegin => "DECODE_BEGIN",
            DecodeEvent::DecodeComplete => "DECODE_COMPLETE",
            DecodeEvent::DecodeFailed => "DECODE_FAILED",
            DecodeEvent::BeamSeeded => "BEAM_SEEDED",
            DecodeEvent::BeamMerged => "BEAM_MERGED",
            DecodeEvent::GreedyStep => "GREEDY_STEP",
        }
    }
}

impl fmt::Display for DecodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
