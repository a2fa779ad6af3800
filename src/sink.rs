// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use std::fmt::Debug;

/// The boundary that consumes finished records.
///
/// Everything on the other side of this trait (buffering, transport,
/// backpressure) is the sink's business; the core hands a record over and
/// moves on. Sink failures are likewise the sink's to handle, since a
/// logging call must not fail because a destination did.
pub trait Sink: Debug + Send + Sync {
    /**
        Accepts one finished record. Ownership passes to the sink.
    */
    fn emit(&self, record: LogRecord);

    /**
    The application may imminently exit. Flush any buffered records.
    */
    fn flush(&self) {}
}

/*
Boilerplate notes.

# Sink

Clone on Sink makes no sense; sinks hold unique resources. PartialEq/Hash are
unclear between data equality and provenance. Send + Sync are required:
records arrive from arbitrary threads.
*/
