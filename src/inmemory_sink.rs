// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory sink for tests and diagnostics.
//!
//! Captures records instead of writing them anywhere, so tests can assert on
//! exactly what a logger emitted: which records, with which properties, and
//! just as importantly that nothing was emitted at all.

use crate::log_record::LogRecord;
use crate::sink::Sink;
use std::sync::Mutex;

/// A [`Sink`] that stores every record it receives.
///
/// Thread-safe; share it behind an `Arc` between the logger under test and
/// the assertions.
///
/// # Example
///
/// ```rust
/// use scopelog::{InMemorySink, Level, ScopedLogger};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let log = ScopedLogger::new("demo", Level::Debug, sink.clone());
/// log.info("ready in {Millis}ms", &[json!(12)]);
///
/// let records = sink.drain();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].message, "ready in 12ms");
/// ```
#[derive(Debug, Default)]
pub struct InMemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Removes and returns everything captured so far.
    pub fn drain(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }

    /// A snapshot of everything captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for InMemorySink {
    fn emit(&self, record: LogRecord) {
        self.records.lock().unwrap().push(record);
    }
}
