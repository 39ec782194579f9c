//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick the log level from `RUST_LOG`, then the command line, then config
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Pretty format for development, compact for log collection
//! - Logs go to stderr so command output on stdout stays machine-readable

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Default filter directive for a log level.
pub fn default_directive(level: &str) -> String {
    format!("webui_router={level},tower_http={level}")
}

/// Install the global subscriber.
///
/// `level_override` (e.g. from `--log-level`) takes precedence over the
/// configured level; `RUST_LOG` takes precedence over both.
pub fn init_logging(
    config: &ObservabilityConfig,
    level_override: Option<&str>,
) -> Result<(), TryInitError> {
    let level = level_override.unwrap_or(config.log_level.as_str());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("debug"), "webui_router=debug,tower_http=debug");
    }
}
