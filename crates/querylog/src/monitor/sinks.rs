use super::types::{QueryEvent, QuerySink};
use std::sync::Arc;

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl QuerySink for NoopSink {
    fn on_query(&self, _event: &QueryEvent) {}
}

/// A composite sink that delegates to multiple sinks, in insertion order.
pub struct CompositeSink {
    sinks: Vec<Arc<dyn QuerySink>>,
}

impl CompositeSink {
    /// Create an empty composite sink.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a sink.
    #[allow(clippy::should_implement_trait)]
    pub fn add<S: QuerySink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Add an Arc-wrapped sink.
    pub fn add_arc(mut self, sink: Arc<dyn QuerySink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Number of registered sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no sinks are registered.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Default for CompositeSink {
    fn default() -> Self {
        Self::new()
    }
}

impl QuerySink for CompositeSink {
    fn on_query(&self, event: &QueryEvent) {
        for sink in &self.sinks {
            sink.on_query(event);
        }
    }
}
