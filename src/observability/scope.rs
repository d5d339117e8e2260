//! DecodeScope for begin/complete/failed logging around one decode call
//!
//! - Logs DECODE_BEGIN on creation
//! - Logs DECODE_COMPLETE on `complete`
//! - Logs DECODE_FAILED on `fail`, or on drop if neither was called

use std::time::Instant;

use super::events::DecodeEvent;
use super::logger::{Logger, Severity};

/// Brackets a decode call in the log
///
/// ```ignore
/// let scope = DecodeScope::new(&logger, &[("positions", "12")]);
/// // ... decode ...
/// scope.complete(&[("best_score", "0.42")]);
/// ```
pub struct DecodeScope<'a> {
    logger: &'a Logger,
    fields: Vec<(&'static str, String)>,
    started: Instant,
    finished: bool,
}

impl<'a> DecodeScope<'a> {
    /// Logs DECODE_BEGIN (TRACE) immediately.
    pub fn new(logger: &'a Logger, fields: &[(&'static str, String)]) -> Self {
        let scope = Self {
            logger,
            fields: fields.to_vec(),
            started: Instant::now(),
            finished: false,
        };
        scope.emit(Severity::Trace, DecodeEvent::DecodeBegin, &[]);
        scope
    }

    /// Logs DECODE_COMPLETE (INFO) with the scope fields, the elapsed time and `extra`.
    pub fn complete(mut self, extra: &[(&'static str, String)]) {
        self.finished = true;
        self.emit(Severity::Info, DecodeEvent::DecodeComplete, extra);
    }

    /// Logs DECODE_FAILED at the given severity with the error code and reason.
    pub fn fail(mut self, severity: Severity, code: &str, reason: &str) {
        self.finished = true;
        self.emit(
            severity,
            DecodeEvent::DecodeFailed,
            &[("code", code.to_string()), ("reason", reason.to_string())],
        );
    }

    /// Milliseconds since the scope was opened
    pub fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }

    fn emit(&self, severity: Severity, event: DecodeEvent, extra: &[(&'static str, String)]) {
        if !self.logger.enabled(severity) {
            return;
        }
        let elapsed = self.elapsed_ms();
        let mut fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .chain(extra.iter())
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        if event != DecodeEvent::DecodeBegin {
            fields.push(("elapsed_ms", elapsed.as_str()));
        }
        self.logger.log(severity, event, &fields);
    }
}

impl Drop for DecodeScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.emit(
                Severity::Error,
                DecodeEvent::DecodeFailed,
                &[("reason", "decode abandoned".to_string())],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::SharedBuffer;
    use serde_json::Value;

    fn events(buffer: &SharedBuffer) -> Vec<Value> {
        buffer
            .lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_scope_begin_and_complete() {
        let buffer = SharedBuffer::new();
        let logger = Logger::to_writer(Severity::Trace, buffer.clone());

        let scope = DecodeScope::new(&logger, &[("positions", "3".to_string())]);
        scope.complete(&[("best_score", "0.5".to_string())]);

        let logged = events(&buffer);
        assert_eq!(logged.len(), 2);
        assert_eq!(logged[0]["event"], "DECODE_BEGIN");
        assert_eq!(logged[0]["positions"], "3");
        assert_eq!(logged[1]["event"], "DECODE_COMPLETE");
        assert_eq!(logged[1]["best_score"], "0.5");
        assert!(logged[1].get("elapsed_ms").is_some());
    }

    #[test]
    fn test_scope_fail_carries_code() {
        let buffer = SharedBuffer::new();
        let logger = Logger::to_writer(Severity::Trace, buffer.clone());

        let scope = DecodeScope::new(&logger, &[]);
        scope.fail(Severity::Fatal, "SEQ_INVARIANT_VIOLATION", "empty distribution");

        let logged = events(&buffer);
        assert_eq!(logged[1]["event"], "DECODE_FAILED");
        assert_eq!(logged[1]["severity"], "FATAL");
        assert_eq!(logged[1]["code"], "SEQ_INVARIANT_VIOLATION");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let buffer = SharedBuffer::new();
        let logger = Logger::to_writer(Severity::Warn, buffer.clone());

        let scope = DecodeScope::new(&logger, &[]);
        drop(scope);

        let logged = events(&buffer);
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0]["event"], "DECODE_FAILED");
        assert_eq!(logged[0]["reason"], "decode abandoned");
    }
}
