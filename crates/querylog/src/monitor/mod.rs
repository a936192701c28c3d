//! Query events and the sinks that log them.
//!
//! An ORM's query-logging hook reports `(query, params, duration)` for each
//! statement. Wrap that in a [`QueryEvent`] and hand it to a [`QuerySink`];
//! [`TracingQueryLogger`] formats the query and emits it through `tracing`.
//!
//! # Example
//!
//! ```rust
//! use querylog::FormatterConfig;
//! use querylog::monitor::{CompositeSink, QueryEvent, QuerySink, TracingQueryLogger};
//! use std::time::Duration;
//!
//! let sink = CompositeSink::new().add(
//!     TracingQueryLogger::new(FormatterConfig::new())
//!         .slow_query_threshold(Duration::from_millis(200)),
//! );
//!
//! sink.on_query(
//!     &QueryEvent::new("SELECT * FROM users WHERE id = $1", "[7]").with_duration_ms(3.2),
//! );
//! ```

mod sinks;
mod tracing_logger;
mod types;


pub use sinks::{CompositeSink, NoopSink};
pub use tracing_logger::TracingQueryLogger;
pub use types::{QueryEvent, QueryKind, QuerySink};
