//! Decode counters
//!
//! - Counters only, monotonic increase
//! - Lock-free, so a decoder shared by reference stays `Sync`

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters describing the work a decoder has done since construction
#[derive(Debug, Default)]
pub struct DecodeMetrics {
    /// decode() calls entered
    decodes_started: AtomicU64,
    /// decode() calls that returned a label sequence
    decodes_completed: AtomicU64,
    /// decode() calls that returned an error
    decodes_failed: AtomicU64,
    /// Single-best classification calls
    classify_calls: AtomicU64,
    /// Distribution scoring calls
    score_calls: AtomicU64,
    /// Outcomes taken from a top-K selection, seeds included; only the merge
    /// winners among them become paths
    candidates_scored: AtomicU64,
    /// Candidates dropped by the merge step
    candidates_discarded: AtomicU64,
}

impl DecodeMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_decodes_started(&self) {
        self.decodes_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_decodes_completed(&self) {
        self.decodes_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_decodes_failed(&self) {
        self.decodes_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_classify_calls(&self) {
        self.classify_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_score_calls(&self) {
        self.score_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_candidates_scored(&self, count: u64) {
        self.candidates_scored.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_candidates_discarded(&self, count: u64) {
        self.candidates_discarded.fetch_add(count, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            decodes_started: self.decodes_started.load(Ordering::Relaxed),
            decodes_completed: self.decodes_completed.load(Ordering::Relaxed),
            decodes_failed: self.decodes_failed.load(Ordering::Relaxed),
            classify_calls: self.classify_calls.load(Ordering::Relaxed),
            score_calls: self.score_calls.load(Ordering::Relaxed),
            candidates_scored: self.candidates_scored.load(Ordering::Relaxed),
            candidates_discarded: self.candidates_discarded.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object with sorted keys
    pub fn to_json(&self) -> String {
        serde_json::json!(self.snapshot()).to_string()
    }
}

/// A point-in-time copy of [`DecodeMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub decodes_started: u64,
    pub decodes_completed: u64,
    pub decodes_failed: u64,
    pub classify_calls: u64,
    pub score_calls: u64,
    pub candidates_scored: u64,
    pub candidates_discarded: u64,
}

impl MetricsSnapshot {
    /// Classifier calls of either kind
    pub fn classifier_calls(&self) -> u64 {
        self.classify_calls + self.score_calls
    }

    /// Counter increase from `earlier` to `self`
    pub fn since(&self, earlier: &MetricsSnapshot) -> MetricsSnapshot {
        MetricsSnapshot {
            decodes_started: self.decodes_started - earlier.decodes_started,
            decodes_completed: self.decodes_completed - earlier.decodes_completed,
            decodes_failed: self.decodes_failed - earlier.decodes_failed,
            classify_calls: self.classify_calls - earlier.classify_calls,
            score_calls: self.score_calls - earlier.score_calls,
            candidates_scored: self.candidates_scored - earlier.candidates_scored,
            candidates_discarded: self.candidates_discarded - earlier.candidates_discarded,
        }
    }
}
