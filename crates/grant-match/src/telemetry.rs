use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Failure to install the engine's log subscriber.
#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter {
        directive: String,
        source: ParseError,
    },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive, .. } => write!(
                f,
                "APP_LOG_LEVEL '{directive}' is not a valid tracing filter (try 'info' or 'grant_match=debug')"
            ),
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a global log subscriber is already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// A parseable `RUST_LOG` override wins; anything else falls back to the configured level.
fn build_filter(
    override_directive: Option<&str>,
    fallback: &str,
) -> Result<EnvFilter, TelemetryError> {
    let parsed_override = override_directive.and_then(|directive| EnvFilter::try_new(directive).ok());
    if let Some(filter) = parsed_override {
        return Ok(filter);
    }

    EnvFilter::try_new(fallback).map_err(|source| TelemetryError::InvalidFilter {
        directive: fallback.to_string(),
        source,
    })
}

/// Install a compact stderr subscriber so stdout stays free for ranking output.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_log_level() {
        match build_filter(None, "grant_match=verbose") {
            Err(TelemetryError::InvalidFilter { directive, .. }) => {
                assert_eq!(directive, "grant_match=verbose")
            }
            other => panic!("expected invalid filter, got {other:?}"),
        }
    }

    #[test]
    fn valid_override_shadows_configured_level() {
        assert!(build_filter(Some("grant_match=debug"), "grant_match=verbose").is_ok());
    }

    #[test]
    fn unparseable_override_falls_back_to_configured_level() {
        assert!(build_filter(Some("grant_match=verbose"), "info").is_ok());
    }
}
