//! Formatter configuration and file-based settings.

use crate::compact::CompactLimits;
use crate::error::ConfigError;
use crate::monitor::TracingQueryLogger;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

/// Default for [`FormatterConfig::max_string_length`].
pub const DEFAULT_MAX_STRING_LENGTH: usize = 100;
/// Default for [`FormatterConfig::max_array_length`].
pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 5;
/// Default for [`FormatterConfig::max_object_keys`].
pub const DEFAULT_MAX_OBJECT_KEYS: usize = 10;

/// Replacement for the whole formatting pipeline: `(query, params) -> output`.
pub type CustomQueryFormatter = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Configuration for [`QueryFormatter`](crate::QueryFormatter).
///
/// Colors are off by default and must be enabled explicitly; nothing here
/// reads or writes process environment.
#[derive(Clone)]
pub struct FormatterConfig {
    /// Emphasise parameters and highlight SQL keywords with ANSI styles.
    pub enable_colors: bool,
    /// Longest string parameter (in chars) shown before cutting.
    pub max_string_length: usize,
    /// Elements kept when compacting array parameters as JSON.
    pub max_array_length: usize,
    /// Properties kept when compacting object parameters as JSON.
    pub max_object_keys: usize,
    /// When set, bypasses parsing, substitution and truncation entirely.
    pub custom_query_formatter: Option<CustomQueryFormatter>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enable_colors: false,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
            max_object_keys: DEFAULT_MAX_OBJECT_KEYS,
            custom_query_formatter: None,
        }
    }
}

impl fmt::Debug for FormatterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterConfig")
            .field("enable_colors", &self.enable_colors)
            .field("max_string_length", &self.max_string_length)
            .field("max_array_length", &self.max_array_length)
            .field("max_object_keys", &self.max_object_keys)
            .field(
                "custom_query_formatter",
                &self.custom_query_formatter.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

impl FormatterConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable ANSI styling.
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.enable_colors = enabled;
        self
    }

    /// Set the longest string parameter shown before cutting.
    pub fn with_max_string_length(mut self, len: usize) -> Self {
        self.max_string_length = len;
        self
    }

    /// Set how many array elements survive JSON compaction.
    pub fn with_max_array_length(mut self, len: usize) -> Self {
        self.max_array_length = len;
        self
    }

    /// Set how many object properties survive JSON compaction.
    pub fn with_max_object_keys(mut self, len: usize) -> Self {
        self.max_object_keys = len;
        self
    }

    /// Replace the formatting pipeline with a custom function.
    ///
    /// The function's output is used verbatim. Panics inside it are not caught.
    pub fn with_custom_formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.custom_query_formatter = Some(Arc::new(f));
        self
    }

    pub(crate) fn limits(&self) -> CompactLimits {
        CompactLimits {
            max_string_length: self.max_string_length,
            max_array_length: self.max_array_length,
            max_object_keys: self.max_object_keys,
        }
    }
}

/// Settings loaded from a TOML file.
///
/// ```toml
/// [formatter]
/// enable_colors = true
/// max_string_length = 80
///
/// [logging]
/// level = "info"
/// slow_query_ms = 250
/// filter = "info,querylog=debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub formatter: FormatterSettings,
    pub logging: LoggingSettings,
}

/// Serialisable subset of [`FormatterConfig`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterSettings {
    pub enable_colors: bool,
    pub max_string_length: usize,
    pub max_array_length: usize,
    pub max_object_keys: usize,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            enable_colors: false,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
            max_object_keys: DEFAULT_MAX_OBJECT_KEYS,
        }
    }
}

/// Query-event logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Level query events are emitted at.
    pub level: String,
    /// Events at or above this many milliseconds are emitted at WARN.
    pub slow_query_ms: Option<u64>,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            slow_query_ms: None,
            filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Check values that TOML typing cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Level::from_str(&self.logging.level).map_err(|_| {
            ConfigError::Invalid(format!(
                "logging.level must be one of trace, debug, info, warn, error (got {:?})",
                self.logging.level
            ))
        })?;
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging.filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Event level, falling back to DEBUG for unvalidated settings.
    pub fn level(&self) -> Level {
        Level::from_str(&self.logging.level).unwrap_or(Level::DEBUG)
    }

    /// Build the formatter configuration these settings describe.
    pub fn formatter_config(&self) -> FormatterConfig {
        let f = &self.formatter;
        FormatterConfig::new()
            .with_colors(f.enable_colors)
            .with_max_string_length(f.max_string_length)
            .with_max_array_length(f.max_array_length)
            .with_max_object_keys(f.max_object_keys)
    }

    /// Build a query logger using these settings.
    pub fn query_logger(&self) -> TracingQueryLogger {
        let logger = TracingQueryLogger::new(self.formatter_config()).level(self.level());
        match self.logging.slow_query_ms {
            Some(ms) => logger.slow_query_threshold(Duration::from_millis(ms)),
            None => logger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FormatterConfig::default();
        assert!(!config.enable_colors);
        assert_eq!(config.max_string_length, 100);
        assert_eq!(config.max_array_length, 5);
        assert_eq!(config.max_object_keys, 10);
        assert!(config.custom_query_formatter.is_none());
    }

    #[test]
    fn debug_hides_custom_formatter() {
        let config = FormatterConfig::new().with_custom_formatter(|q, _| q.to_string());
        let text = format!("{config:?}");
        assert!(text.contains("Some(\"<fn>\")"));
    }

    #[test]
    fn settings_from_toml() {
        let settings = Settings::from_toml_str(
            r#"
            [formatter]
            enable_colors = true
            max_string_length = 80

            [logging]
            level = "info"
            slow_query_ms = 250
            "#,
        )
        .unwrap();

        let config = settings.formatter_config();
        assert!(config.enable_colors);
        assert_eq!(config.max_string_length, 80);
        assert_eq!(config.max_array_length, DEFAULT_MAX_ARRAY_LENGTH);
        assert_eq!(settings.level(), Level::INFO);
        assert_eq!(settings.logging.slow_query_ms, Some(250));
        assert_eq!(settings.logging.filter, "info");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.level(), Level::DEBUG);
        assert_eq!(settings.formatter.max_object_keys, DEFAULT_MAX_OBJECT_KEYS);
    }

    #[test]
    fn invalid_level_is_rejected() {
        let err = Settings::from_toml_str("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Settings::from_toml_str("[formatter]\ncolour = true").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load("/nonexistent/querylog.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/querylog.toml"));
    }
}
