//! Subscriber setup for applications that log through querylog.
//!
//! Libraries should not install subscribers; this is for binaries and demos
//! that want query events on the console without wiring `tracing-subscriber`
//! themselves.

use crate::config::Settings;
use crate::error::ConfigError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter: `RUST_LOG` when set, otherwise `directive`.
pub fn env_filter(directive: &str) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(directive)
            .map_err(|e| ConfigError::Invalid(format!("logging.filter {directive:?}: {e}"))),
    }
}

/// Install a global console subscriber.
///
/// ANSI output follows `formatter.enable_colors`. Returns `Ok(false)` when a
/// global subscriber was already installed; the existing one is kept.
pub fn init(settings: &Settings) -> Result<bool, ConfigError> {
    let filter = env_filter(&settings.logging.filter)?;

    let console_layer = fmt::layer()
        .with_ansi(settings.formatter.enable_colors)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(target: "querylog", filter = %settings.logging.filter, "logging initialised");
    }
    Ok(installed)
}
