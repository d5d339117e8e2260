//! Structured JSON logger for the decoder
//!
//! - One log line = one event, one JSON object
//! - Deterministic (alphabetical) key ordering
//! - Explicit severity levels, lines below the minimum are dropped
//! - Synchronous, no buffering

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::events::DecodeEvent;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Per-position detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Defects in a collaborator, never retried
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cloneable in-memory sink, useful for capturing log lines.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        match self.inner.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => String::new(),
        }
    }

    /// Complete lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match self.inner.lock() {
            Ok(mut buf) => {
                buf.extend_from_slice(data);
                Ok(data.len())
            }
            Err(_) => Err(io::Error::new(io::ErrorKind::Other, "log buffer poisoned")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A structured logger that writes JSON lines to a sink
pub struct Logger {
    min_severity: Severity,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    /// Logger writing to stderr, dropping anything below `min_severity`
    pub fn stderr(min_severity: Severity) -> Self {
        Self::to_writer(min_severity, io::stderr())
    }

    /// Logger writing to an arbitrary sink
    pub fn to_writer<W: Write + Send + 'static>(min_severity: Severity, writer: W) -> Self {
        Self {
            min_severity,
            sink: Mutex::new(Box::new(writer)),
        }
    }

    /// Logger that discards every line
    pub fn silent() -> Self {
        Self::to_writer(Severity::Fatal, io::sink())
    }

    /// Whether a line at `severity` would be written
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }

    /// Log an event with the given severity and fields
    pub fn log(&self, severity: Severity, event: DecodeEvent, fields: &[(&str, &str)]) {
        if !self.enabled(severity) {
            return;
        }

        let mut line = render_line(severity, event, fields);
        line.push('\n');

        // One write per line; a failing sink never fails a decode.
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.write_all(line.as_bytes());
            let _ = sink.flush();
        }
    }

    pub fn trace(&self, event: DecodeEvent, fields: &[(&str, &str)]) {
        self.log(Severity::Trace, event, fields);
    }

    pub fn info(&self, event: DecodeEvent, fields: &[(&str, &str)]) {
        self.log(Severity::Info, event, fields);
    }

    pub fn error(&self, event: DecodeEvent, fields: &[(&str, &str)]) {
        self.log(Severity::Error, event, fields);
    }

    pub fn fatal(&self, event: DecodeEvent, fields: &[(&str, &str)]) {
        self.log(Severity::Fatal, event, fields);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_severity", &self.min_severity)
            .finish_non_exhaustive()
    }
}

/// Renders one log line without the trailing newline.
///
/// `serde_json::Map` is ordered by key, which gives the deterministic layout.
fn render_line(severity: Severity, event: DecodeEvent, fields: &[(&str, &str)]) -> String {
    let mut object = Map::new();
    for (key, value) in fields {
        object.insert((*key).to_string(), Value::String((*value).to_string()));
    }
    object.insert("event".to_string(), Value::String(event.as_str().to_string()));
    object.insert(
        "severity".to_string(),
        Value::String(severity.as_str().to_string()),
    );
    Value::Object(object).to_string()
}
