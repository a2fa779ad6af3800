// SPDX-License-Identifier: MIT OR Apache-2.0

//! The finished log record.
//!
//! One record is produced per logging call and handed to the sink whole:
//! rendered text for humans, the property map for machines, plus the
//! identity metadata (source, timestamp, thread) that scoped loggers stamp
//! at emit time. Records are immutable once constructed; ownership passes to
//! the sink.

use crate::level::Level;
use crate::property_map::PropertyMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub level: Level,
    /// Rendered message text, literal spans with bound values substituted.
    pub message: String,
    /// Structured properties in first-bound order.
    pub properties: PropertyMap,
    /// Stringified error that prompted this record, if any.
    pub cause: Option<String>,
    /// Identity of the logger that produced the record.
    pub source: String,
    pub timestamp: DateTime<Utc>,
    /// Name of the emitting thread, or its id when unnamed.
    pub thread: String,
}

impl LogRecord {
    /// Stamps `timestamp` and `thread` from the calling environment; the
    /// rest is supplied by the facade.
    pub fn new(
        level: Level,
        source: impl Into<String>,
        message: impl Into<String>,
        properties: PropertyMap,
        cause: Option<String>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            properties,
            cause,
            source: source.into(),
            timestamp: Utc::now(),
            thread: current_thread_label(),
        }
    }
}

fn current_thread_label() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_owned(),
        None => format!("{:?}", thread.id()),
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:5} {} [{}] {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.level,
            self.source,
            self.thread,
            self.message
        )?;
        if let Some(cause) = &self.cause {
            write!(f, " cause={cause}")?;
        }
        for (name, value) in self.properties.iter() {
            write!(f, " {name}={value}")?;
        }
        Ok(())
    }
}

/*
Boilerplate notes for LogRecord:

Clone is cheap enough (strings and a small vec) and lets one record fan out
to several sinks. PartialEq is for tests. Hash/Ord have no meaningful
semantics here. Default is omitted on purpose: a record without a level and
source is not a sensible value.
*/
