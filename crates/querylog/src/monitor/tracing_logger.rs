use super::types::{QueryEvent, QuerySink};
use crate::config::FormatterConfig;
use crate::formatter::QueryFormatter;
use crate::params::parse;
use std::time::Duration;
use tracing::Level;

/// A `tracing`-based sink that emits each query, formatted for display.
///
/// Events go to target `querylog.sql` at the configured level, or at WARN
/// (ERROR stays ERROR) once the reported duration reaches the slow-query
/// threshold.
#[derive(Debug, Clone)]
pub struct TracingQueryLogger {
    formatter: QueryFormatter,
    /// Tracing event level to emit at.
    pub level: Level,
    /// Durations at or above this are emitted as slow queries.
    pub slow_query_threshold: Option<Duration>,
}

impl Default for TracingQueryLogger {
    fn default() -> Self {
        Self::new(FormatterConfig::default())
    }
}

impl TracingQueryLogger {
    /// Create a logger formatting with `config`, emitting at DEBUG.
    pub fn new(config: FormatterConfig) -> Self {
        Self {
            formatter: QueryFormatter::new(config),
            level: Level::DEBUG,
            slow_query_threshold: None,
        }
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Escalate events at or above this duration.
    pub fn slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    /// The formatter used for the `sql` field.
    pub fn formatter(&self) -> &QueryFormatter {
        &self.formatter
    }

    pub(crate) fn is_slow(&self, duration: Duration) -> bool {
        self.slow_query_threshold
            .is_some_and(|threshold| duration >= threshold)
    }

    pub(crate) fn event_level(&self, duration: Duration) -> Level {
        if self.is_slow(duration) {
            // Lower levels are less verbose: ERROR < WARN < INFO.
            self.level.min(Level::WARN)
        } else {
            self.level
        }
    }

    fn emit(&self, event: &QueryEvent, sql: &str) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let tag = event.tag.as_deref().unwrap_or("-");
        let duration_ms = event.duration.as_micros() as f64 / 1000.0;
        let param_count = parse(&event.params).map_or(0, |params| params.len());
        let slow = self.is_slow(event.duration);
        let fields = tracing::field::debug(&event.fields);
        emit_at_level!(
            self.event_level(event.duration),
            target: "querylog.sql",
            kind = ?event.kind,
            tag,
            duration_ms,
            param_count,
            slow,
            sql = %sql,
            fields = fields,
        );
    }
}

impl QuerySink for TracingQueryLogger {
    fn on_query(&self, event: &QueryEvent) {
        let sql = self.formatter.format_event(event);
        self.emit(event, &sql);
    }
}
