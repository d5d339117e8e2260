//! Observability subsystem for the decoder
//!
//! Provides:
//! - Structured logging (JSON lines)
//! - Decode counters
//! - Begin/complete bracketing of decode calls
//!
//! # Principles
//!
//! 1. Observability is read-only: nothing here changes a decode result
//! 2. Synchronous, no background threads
//! 3. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use seqbeam::observability::{DecodeEvent, Logger, Severity};
//!
//! let logger = Logger::stderr(Severity::Info);
//! logger.info(DecodeEvent::DecodeComplete, &[("positions", "42")]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::DecodeEvent;
pub use logger::{Logger, Severity, SharedBuffer};
pub use metrics::{DecodeMetrics, MetricsSnapshot};
pub use scope::DecodeScope;
