//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# scopelog

scopelog is the hot-path core of a structured-logging adapter: it turns a
message template plus arguments into rendered text and structured
properties, caches parsed templates for reuse, and lets callers fork
"scoped" loggers that accumulate context without mutating anything shared.

# The problem

A logging call like `log.info("put {Count} in {Bucket}", ...)` has two
audiences. Humans want the rendered line; log pipelines want the named,
typed properties. Doing both on every call, from many threads, without
re-parsing the same format strings forever and without copying the logger's
accumulated context on every request, is the part that has to be engineered
rather than just written. That part is this crate.

# The pieces

* [`Template`] / [`TemplateCache`]: format strings parse once into an
  immutable token sequence; the cache is bounded (1000 entries, wholesale
  reset on overflow) and skips pathological strings over 1024 characters.
* [`TemplateFormatter`]: binds arguments to placeholders. Structured
  binding runs first (collections keep their shape and render canonically,
  e.g. `[0, 1, 2]`), with an opaque scalar fallback when that declines.
  Binding trouble never fails the call.
* [`ContextChain`]: a persistent linked list of enrichments. Forking a
  logger prepends one node and shares the rest, so request-scoped forks are
  O(1) and safe under any amount of concurrency.
* [`ScopedLogger`]: the facade. Level-gated `debug`/`info`/`warning`/
  `error` operations plus [`with_context`](ScopedLogger::with_context)
  forking. Disabled levels never even reach the formatter.
* [`Sink`]: the outbound boundary. [`StderrSink`] is the reference
  implementation; [`InMemorySink`] captures records for tests.

# The API

```rust
use scopelog::{InMemorySink, Level, ScopedLogger};
use serde_json::json;
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let log = ScopedLogger::new("orders", Level::Info, sink.clone());

let scoped = log
    .with_context("request_id", json!("7f3a"))
    .with_context("user", json!("ada"));
scoped.info("accepted {Count} items", &[json!(3)]);

let record = sink.drain().remove(0);
assert_eq!(record.message, "accepted 3 items");
assert!(record.properties.contains("request_id"));
assert!(record.properties.contains("user"));
```

# Concurrency

Nothing in the core blocks or suspends. The template cache is the only
shared mutable state and is guarded only around its own map operations;
templates, context nodes, and finished records are immutable and shared
structurally. Loggers and all of their forks may be used from any thread.
*/

mod context;
mod error;
mod formatter;
mod inmemory_sink;
mod level;
mod log_record;
mod payload;
mod property_map;
mod scoped_logger;
mod sink;
mod stderr_sink;
mod template;
mod template_cache;
mod value;

pub use context::{ContextChain, Enrichment};
pub use error::{BindError, FormatError};
pub use formatter::{MessageFormatter, RenderedMessage, TemplateFormatter};
pub use inmemory_sink::InMemorySink;
pub use level::Level;
pub use log_record::LogRecord;
pub use payload::MessagePayload;
pub use property_map::PropertyMap;
pub use scoped_logger::ScopedLogger;
pub use sink::Sink;
pub use stderr_sink::StderrSink;
pub use template::Template;
pub use template_cache::{MAX_CACHE_ITEMS, MAX_CACHED_TEMPLATE_LENGTH, TemplateCache};
pub use value::PropertyValue;
