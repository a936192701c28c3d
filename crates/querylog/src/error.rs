//! Error types for querylog

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;

/// Why a raw parameter string could not be turned into a parameter list.
///
/// Never surfaced past [`QueryFormatter::format`](crate::QueryFormatter::format);
/// it only decides which fallback strategy runs next.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// Input was empty or whitespace only
    #[error("parameter string is empty")]
    Empty,

    /// Input is not delimited by `[` and `]`
    #[error("parameter string is not bracket-delimited")]
    NotBracketed,

    /// JSON decoding failed
    #[error("invalid JSON: {0}")]
    Json(String),

    /// Input decoded to something other than an array
    #[error("parameters did not decode to an array")]
    NotAnArray,

    /// Every parse strategy failed
    #[error("no parse strategy accepted the parameter string")]
    Exhausted,
}

impl From<serde_json::Error> for ParseFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Errors raised inside the formatting pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Parameter string could not be parsed
    #[error("parameter parse failed: {0}")]
    Parse(#[from] ParseFailure),

    /// Query contains a placeholder that cannot refer to any parameter
    #[error("invalid placeholder: {0}")]
    InvalidPlaceholder(String),
}

impl FormatError {
    /// Check if this error came from parameter parsing
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Errors raised while loading [`Settings`](crate::Settings)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for the expected layout
    #[error("failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// Settings parsed but hold an unusable value
    #[error("invalid settings: {0}")]
    Invalid(String),
}
