//! # querylog
//!
//! Readable SQL for logs.
//!
//! ORM query hooks hand over the SQL text with placeholders and the bound
//! parameters as a (usually JSON) string. `querylog` turns that pair into one
//! line a human can read:
//!
//! - **Parameter parsing** that tolerates double-encoded JSON and stray quotes
//! - **Placeholder substitution** for both `@P1` and `$1` styles
//! - **Smart truncation** of long `IN (...)` lists and array parameters,
//!   keeping the first and last three items and the exact elided count
//! - **Optional ANSI styling** of parameters and SQL keywords
//! - **Query events and sinks** that emit formatted queries through `tracing`
//!
//! ```rust
//! use querylog::{FormatterConfig, QueryFormatter};
//!
//! let formatter = QueryFormatter::new(FormatterConfig::new());
//! let params = format!("[{}]", (1..=11).map(|i| i.to_string()).collect::<Vec<_>>().join(","));
//! let placeholders = (1..=11).map(|i| format!("@P{i}")).collect::<Vec<_>>().join(",");
//!
//! let out = formatter.format(&format!("SELECT * FROM Users WHERE id IN ({placeholders})"), &params);
//! assert_eq!(out, "SELECT * FROM Users WHERE id IN (1,2,3,...5 more...,9,10,11)");
//! ```

pub mod compact;
pub mod config;
pub mod error;
pub mod formatter;
pub mod highlight;
pub mod monitor;
pub mod params;
pub mod substitute;
pub mod truncate;

#[cfg(feature = "subscriber")]
pub mod logging;

pub use compact::{CompactLimits, compact_value};
pub use config::{CustomQueryFormatter, FormatterConfig, Settings};
pub use error::{ConfigError, FormatError, FormatResult, ParseFailure};
pub use formatter::QueryFormatter;
pub use highlight::highlight;
pub use monitor::{CompositeSink, NoopSink, QueryEvent, QueryKind, QuerySink, TracingQueryLogger};
pub use params::{ParseStrategy, ParsedParam, parse, parse_params};
pub use substitute::{render_param, substitute};
pub use truncate::{TRUNCATE_THRESHOLD, elide_items, truncate};
