// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end behavior of the scoped logger facade.

use scopelog::{
    FormatError, InMemorySink, Level, MessageFormatter, MessagePayload, PropertyMap,
    PropertyValue, RenderedMessage, ScopedLogger,
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Formatter double that counts invocations, for proving the disabled-level
/// contract.
#[derive(Debug, Default)]
struct CountingFormatter {
    calls: AtomicUsize,
}

impl CountingFormatter {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MessageFormatter for CountingFormatter {
    fn format(&self, template: &str, _args: &[serde_json::Value]) -> RenderedMessage {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RenderedMessage {
            text: template.to_owned(),
            properties: PropertyMap::new(),
        }
    }
}

fn logger_with_sink(minimum_level: Level) -> (ScopedLogger, Arc<InMemorySink>) {
    let sink = Arc::new(InMemorySink::new());
    let logger = ScopedLogger::new("test-source", minimum_level, sink.clone());
    (logger, sink)
}

#[test]
fn forks_are_isolated_from_each_other() {
    let (l0, sink) = logger_with_sink(Level::Debug);
    let l1 = l0.with_context("a", json!(1));
    let l2 = l1.with_context("b", json!(2));

    l0.info("from l0", &[]);
    l1.info("from l1", &[]);
    l2.info("from l2", &[]);

    let records = sink.drain();
    assert_eq!(records.len(), 3);

    assert!(!records[0].properties.contains("a"));
    assert!(!records[0].properties.contains("b"));

    assert!(records[1].properties.contains("a"));
    assert!(!records[1].properties.contains("b"));

    assert!(records[2].properties.contains("a"));
    assert!(records[2].properties.contains("b"));
}

#[test]
fn disabled_levels_never_reach_the_formatter() {
    let sink = Arc::new(InMemorySink::new());
    let formatter = Arc::new(CountingFormatter::default());
    let logger = ScopedLogger::with_formatter(
        "test-source",
        Level::Warning,
        sink.clone(),
        formatter.clone(),
    );

    logger.debug("never {rendered}", &[json!(1)]);
    logger.info("never {rendered}", &[json!(2)]);
    assert_eq!(formatter.calls(), 0);
    assert!(sink.is_empty());

    logger.warning("rendered once", &[]);
    assert_eq!(formatter.calls(), 1);
    assert_eq!(sink.len(), 1);
}

#[test]
fn level_flags_follow_the_minimum_level() {
    let (logger, _sink) = logger_with_sink(Level::Info);
    assert!(!logger.is_debug_enabled());
    assert!(logger.is_info_enabled());
    assert!(logger.is_warning_enabled());
    assert!(logger.is_error_enabled());

    // Forks inherit the gate.
    let fork = logger.with_context("k", json!(1));
    assert!(!fork.is_debug_enabled());
    assert!(fork.is_error_enabled());
}

#[test]
fn chain_context_overrides_template_properties() {
    let (logger, sink) = logger_with_sink(Level::Debug);
    let scoped = logger.with_context("x", json!("from-context"));
    scoped.info("x is {x}", &[json!("from-args")]);

    let record = sink.drain().remove(0);
    assert_eq!(
        record.properties.get("x"),
        Some(&PropertyValue::Scalar(json!("from-context")))
    );
}

#[test]
fn newest_fork_wins_within_the_chain() {
    let (logger, sink) = logger_with_sink(Level::Debug);
    let scoped = logger
        .with_context("x", json!("older"))
        .with_context("x", json!("newer"));
    scoped.info("hello", &[]);

    let record = sink.drain().remove(0);
    assert_eq!(
        record.properties.get("x"),
        Some(&PropertyValue::Scalar(json!("newer")))
    );
    assert_eq!(record.properties.len(), 1);
}

#[test]
fn destructured_context_keeps_collection_shape() {
    let (logger, sink) = logger_with_sink(Level::Debug);
    let scoped = logger.with_context_destructured("ids", json!([1, 2, 3]));
    scoped.info("batch", &[]);

    let record = sink.drain().remove(0);
    assert_eq!(
        record.properties.get("ids"),
        Some(&PropertyValue::destructure(&json!([1, 2, 3])))
    );
    assert_eq!(record.properties.get("ids").unwrap().to_string(), "[1, 2, 3]");
}

#[test]
fn template_properties_and_context_both_land_on_the_record() {
    let (logger, sink) = logger_with_sink(Level::Debug);
    let scoped = logger.with_context("request_id", json!("7f3a"));
    scoped.info("put {Count} in {Bucket}", &[json!(3), json!("b1")]);

    let record = sink.drain().remove(0);
    assert_eq!(record.message, "put 3 in \"b1\"");
    assert_eq!(record.properties.len(), 3);
    let names: Vec<_> = record.properties.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["Count", "Bucket", "request_id"]);
}

#[test]
fn causes_are_carried_on_the_record() {
    let (logger, sink) = logger_with_sink(Level::Debug);
    let failure = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    logger.error_with_cause(&failure, "fetch failed after {Attempts} attempts", &[json!(3)]);

    let record = sink.drain().remove(0);
    assert_eq!(record.level, Level::Error);
    assert_eq!(record.message, "fetch failed after 3 attempts");
    assert_eq!(record.cause.as_deref(), Some("upstream timed out"));
}

#[test]
fn records_carry_source_timestamp_and_thread() {
    let (logger, sink) = logger_with_sink(Level::Debug);
    let before = chrono::Utc::now();
    logger.info("stamped", &[]);
    let after = chrono::Utc::now();

    let record = sink.drain().remove(0);
    assert_eq!(record.source, "test-source");
    assert!(record.timestamp >= before && record.timestamp <= after);
    assert!(!record.thread.is_empty());
}

#[test]
fn plain_payloads_skip_formatting_entirely() {
    let sink = Arc::new(InMemorySink::new());
    let formatter = Arc::new(CountingFormatter::default());
    let logger =
        ScopedLogger::with_formatter("test-source", Level::Debug, sink.clone(), formatter.clone());

    logger.log_payload(Level::Info, MessagePayload::plain("already rendered {x}"));
    assert_eq!(formatter.calls(), 0);

    let record = sink.drain().remove(0);
    assert_eq!(record.message, "already rendered {x}");
    assert!(record.properties.is_empty());
}

#[test]
fn templated_payloads_format_like_direct_calls() {
    let (logger, sink) = logger_with_sink(Level::Debug);
    let payload = MessagePayload::templated(Some("n = {n}".to_owned()), vec![json!(9)])
        .expect("format supplied");
    logger.log_payload(Level::Info, payload);

    let record = sink.drain().remove(0);
    assert_eq!(record.message, "n = 9");
}

#[test]
fn missing_template_is_the_one_surfaced_error() {
    // Recoverable conditions render something instead of failing...
    let (logger, sink) = logger_with_sink(Level::Debug);
    logger.info("{a} {b}", &[json!(1)]);
    logger.info("{not closed", &[]);
    assert_eq!(sink.drain().len(), 2);

    // ...while an absent format string is rejected before a record exists.
    let rejected = MessagePayload::templated(None, vec![json!(1)]);
    assert_eq!(rejected, Err(FormatError::MissingTemplate));
}

#[test]
fn forked_loggers_share_one_template_cache() {
    let sink = Arc::new(InMemorySink::new());
    let formatter = Arc::new(scopelog::TemplateFormatter::new());
    let logger =
        ScopedLogger::with_formatter("test-source", Level::Debug, sink.clone(), formatter.clone());

    logger.info("shared {n}", &[json!(1)]);
    logger
        .with_context("k", json!(1))
        .info("shared {n}", &[json!(2)]);

    assert_eq!(formatter.cache().len(), 1);
}

#[test]
fn loggers_log_concurrently_through_shared_state() {
    let sink = Arc::new(InMemorySink::new());
    let formatter = Arc::new(scopelog::TemplateFormatter::new());
    let root =
        ScopedLogger::with_formatter("test-source", Level::Debug, sink.clone(), formatter.clone());

    let mut handles = Vec::new();
    for worker in 0..4 {
        let fork = root.with_context("worker", json!(worker));
        handles.push(std::thread::spawn(move || {
            for i in 0..50 {
                fork.info("worker message {i}", &[json!(i)]);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let records = sink.drain();
    assert_eq!(records.len(), 200);
    assert!(records.iter().all(|r| r.properties.contains("worker")));
    assert_eq!(formatter.cache().len(), 1);
}
