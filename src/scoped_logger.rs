// SPDX-License-Identifier: MIT OR Apache-2.0

//! The scoped logger facade.
//!
//! A [`ScopedLogger`] composes the formatter, a context chain, and a level
//! gate. It is an immutable value: "adding context" means forking a new
//! logger that shares the formatter, sink, and chain tail with its parent.
//! The parent and every earlier fork remain valid and unchanged, so loggers
//! can be handed freely across threads and scopes.
//!
//! # Example
//!
//! ```rust
//! use scopelog::{InMemorySink, Level, ScopedLogger};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! let log = ScopedLogger::new("checkout", Level::Info, sink.clone());
//!
//! // Fork a request-scoped logger; `log` itself is unaffected.
//! let request_log = log.with_context("request_id", json!("7f3a"));
//! request_log.info("accepted {Count} items", &[json!(3)]);
//!
//! let records = sink.drain();
//! assert_eq!(records[0].message, "accepted 3 items");
//! assert!(records[0].properties.contains("request_id"));
//! ```

use crate::context::ContextChain;
use crate::formatter::{MessageFormatter, RenderedMessage, TemplateFormatter};
use crate::level::Level;
use crate::log_record::LogRecord;
use crate::payload::MessagePayload;
use crate::property_map::PropertyMap;
use crate::sink::Sink;
use crate::value::PropertyValue;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ScopedLogger {
    formatter: Arc<dyn MessageFormatter>,
    sink: Arc<dyn Sink>,
    source: Arc<str>,
    context: ContextChain,
    debug_enabled: bool,
    info_enabled: bool,
    warning_enabled: bool,
    error_enabled: bool,
}

impl ScopedLogger {
    /// A logger with its own [`TemplateFormatter`]. To share one template
    /// cache across loggers, use [`ScopedLogger::with_formatter`].
    pub fn new(source: impl Into<String>, minimum_level: Level, sink: Arc<dyn Sink>) -> Self {
        Self::with_formatter(source, minimum_level, sink, Arc::new(TemplateFormatter::new()))
    }

    pub fn with_formatter(
        source: impl Into<String>,
        minimum_level: Level,
        sink: Arc<dyn Sink>,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Self {
        // The four flags are fixed at construction; forks inherit them.
        ScopedLogger {
            formatter,
            sink,
            source: source.into().into(),
            context: ContextChain::new(),
            debug_enabled: minimum_level <= Level::Debug,
            info_enabled: minimum_level <= Level::Info,
            warning_enabled: minimum_level <= Level::Warning,
            error_enabled: minimum_level <= Level::Error,
        }
    }

    /// Returns a new logger that logs the given enrichment on every record,
    /// on top of everything this logger already carries. O(1); this logger
    /// is unaffected.
    pub fn with_context(&self, name: impl Into<String>, value: Value) -> ScopedLogger {
        self.forked(name, value, false)
    }

    /// Like [`with_context`](Self::with_context), but the value is
    /// destructured into sequence/structure form when the record is built.
    pub fn with_context_destructured(
        &self,
        name: impl Into<String>,
        value: Value,
    ) -> ScopedLogger {
        self.forked(name, value, true)
    }

    fn forked(&self, name: impl Into<String>, value: Value, destructure: bool) -> ScopedLogger {
        ScopedLogger {
            context: self.context.fork(name, value, destructure),
            ..self.clone()
        }
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    pub fn is_info_enabled(&self) -> bool {
        self.info_enabled
    }

    pub fn is_warning_enabled(&self) -> bool {
        self.warning_enabled
    }

    pub fn is_error_enabled(&self) -> bool {
        self.error_enabled
    }

    pub fn debug(&self, format: &str, args: &[Value]) {
        self.log(Level::Debug, format, args);
    }

    pub fn info(&self, format: &str, args: &[Value]) {
        self.log(Level::Info, format, args);
    }

    pub fn warning(&self, format: &str, args: &[Value]) {
        self.log(Level::Warning, format, args);
    }

    pub fn error(&self, format: &str, args: &[Value]) {
        self.log(Level::Error, format, args);
    }

    pub fn warning_with_cause(
        &self,
        cause: &(dyn std::error::Error + 'static),
        format: &str,
        args: &[Value],
    ) {
        self.log_with_cause(Level::Warning, cause, format, args);
    }

    pub fn error_with_cause(
        &self,
        cause: &(dyn std::error::Error + 'static),
        format: &str,
        args: &[Value],
    ) {
        self.log_with_cause(Level::Error, cause, format, args);
    }

    pub fn log(&self, level: Level, format: &str, args: &[Value]) {
        self.dispatch(level, None, format, args);
    }

    pub fn log_with_cause(
        &self,
        level: Level,
        cause: &(dyn std::error::Error + 'static),
        format: &str,
        args: &[Value],
    ) {
        self.dispatch(level, Some(cause.to_string()), format, args);
    }

    /// Logs an already-resolved payload.
    pub fn log_payload(&self, level: Level, payload: MessagePayload) {
        if !self.enabled(level) {
            return;
        }
        let rendered = match payload {
            MessagePayload::Plain { text } => RenderedMessage {
                text,
                properties: PropertyMap::new(),
            },
            MessagePayload::Templated { format, args } => self.formatter.format(&format, &args),
        };
        self.emit(level, None, rendered);
    }

    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Debug => self.debug_enabled,
            Level::Info => self.info_enabled,
            Level::Warning => self.warning_enabled,
            Level::Error => self.error_enabled,
        }
    }

    fn dispatch(&self, level: Level, cause: Option<String>, format: &str, args: &[Value]) {
        // A disabled level does no work at all: the formatter must not run.
        if !self.enabled(level) {
            return;
        }
        let rendered = self.formatter.format(format, args);
        self.emit(level, cause, rendered);
    }

    fn emit(&self, level: Level, cause: Option<String>, rendered: RenderedMessage) {
        let RenderedMessage {
            text,
            mut properties,
        } = rendered;
        // Chain context overrides template-derived values on a name clash,
        // and the newest fork wins within the chain, so enrichments apply
        // root to head with the head landing last.
        for enrichment in self.context.materialize().iter().rev() {
            let value = if enrichment.destructure {
                PropertyValue::destructure(&enrichment.value)
            } else {
                PropertyValue::scalar(&enrichment.value)
            };
            properties.insert(enrichment.name.clone(), value);
        }
        let record = LogRecord::new(level, self.source.as_ref(), text, properties, cause);
        self.sink.emit(record);
    }
}
