//! The query display formatter.

use crate::config::FormatterConfig;
use crate::error::{FormatResult, ParseFailure};
use crate::highlight::highlight;
use crate::monitor::QueryEvent;
use crate::params::parse_params;
use crate::substitute::substitute;
use crate::truncate::truncate;

/// Turns a `(query, params)` pair into a single readable log string.
///
/// Parses the parameter string, substitutes placeholders, truncates long
/// `IN (...)` lists and optionally highlights keywords. Formatting never
/// fails: anything that goes wrong yields the original query, still
/// truncated.
///
/// # Example
///
/// ```rust
/// use querylog::{FormatterConfig, QueryFormatter};
///
/// let formatter = QueryFormatter::new(FormatterConfig::new());
/// let out = formatter.format(
///     "SELECT * FROM Users WHERE id = @P1 AND name = @P2",
///     r#"[1,"John"]"#,
/// );
/// assert_eq!(out, "SELECT * FROM Users WHERE id = 1 AND name = 'John'");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryFormatter {
    config: FormatterConfig,
}

impl QueryFormatter {
    /// Create a formatter with the given configuration.
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// The configuration this formatter was built with.
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Format a query for display.
    ///
    /// A configured custom formatter is called instead of the built-in
    /// pipeline and its output returned as is.
    pub fn format(&self, query: &str, params: &str) -> String {
        if let Some(custom) = &self.config.custom_query_formatter {
            return custom(query, params);
        }

        match self.try_format(query, params) {
            Ok(formatted) => formatted,
            Err(err) => {
                tracing::debug!(
                    target: "querylog.format",
                    error = %err,
                    "showing query without parameters"
                );
                self.finish(query)
            }
        }
    }

    /// Format the query carried by a [`QueryEvent`].
    pub fn format_event(&self, event: &QueryEvent) -> String {
        self.format(&event.query, &event.params)
    }

    /// Run the built-in pipeline, surfacing the first failure.
    ///
    /// Ignores `custom_query_formatter`. An empty parameter string is not an
    /// error: the query is returned truncated but unsubstituted.
    pub fn try_format(&self, query: &str, params: &str) -> FormatResult<String> {
        let parsed = match parse_params(params) {
            Ok(parsed) => parsed,
            Err(ParseFailure::Empty) => return Ok(self.finish(query)),
            Err(err) => return Err(err.into()),
        };
        let substituted = substitute(query, &parsed, &self.config)?;
        Ok(self.finish(&substituted))
    }

    fn finish(&self, text: &str) -> String {
        highlight(&truncate(text), self.config.enable_colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn formatter() -> QueryFormatter {
        QueryFormatter::default()
    }

    #[test]
    fn empty_params_still_truncate() {
        let list: Vec<String> = (1..=11).map(|i| i.to_string()).collect();
        let sql = format!("SELECT * FROM t WHERE id IN ({})", list.join(","));
        assert_eq!(
            formatter().format(&sql, "  "),
            "SELECT * FROM t WHERE id IN (1,2,3,...5 more...,9,10,11)"
        );
    }

    #[test]
    fn colors_apply_without_a_terminal() {
        let f = QueryFormatter::new(FormatterConfig::new().with_colors(true));
        assert_eq!(
            f.format("SELECT * FROM t WHERE id = $1", "[1]"),
            "\x1b[36mSELECT\x1b[0m * \x1b[36mFROM\x1b[0m t \x1b[36mWHERE\x1b[0m id = \x1b[1m1\x1b[0m"
        );
        assert!(!formatter().format("SELECT * FROM t WHERE id = $1", "[1]").contains('\x1b'));
    }

    #[test]
    fn try_format_reports_parse_failure() {
        let err = formatter().try_format("SELECT 1", "{invalid}").unwrap_err();
        assert_eq!(err, FormatError::Parse(ParseFailure::Exhausted));
    }

    #[test]
    fn invalid_placeholder_falls_back_to_query() {
        let f = formatter();
        assert!(f.try_format("SELECT $0, $1", "[1]").is_err());
        assert_eq!(f.format("SELECT $0, $1", "[1]"), "SELECT $0, $1");
    }

    #[test]
    fn custom_formatter_bypasses_pipeline() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let config = FormatterConfig::new().with_custom_formatter(move |q, p| {
            seen.fetch_add(1, Ordering::Relaxed);
            format!("{q} -- {p}")
        });
        let f = QueryFormatter::new(config);

        let list: Vec<String> = (1..=20).map(|i| i.to_string()).collect();
        let sql = format!("SELECT * FROM t WHERE id IN ({})", list.join(","));
        assert_eq!(f.format(&sql, "not json"), format!("{sql} -- not json"));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn format_event_uses_query_and_params() {
        let event = QueryEvent::new("SELECT $1", "[42]");
        assert_eq!(formatter().format_event(&event), "SELECT 42");
    }

    #[test]
    fn formatter_is_shareable_across_threads() {
        let f = Arc::new(formatter());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let f = f.clone();
                std::thread::spawn(move || f.format("SELECT $1", &format!("[{i}]")))
            })
            .collect();
        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outputs, ["SELECT 0", "SELECT 1", "SELECT 2", "SELECT 3"]);
    }
}
