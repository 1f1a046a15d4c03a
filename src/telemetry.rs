//! Structured log output.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Boxed error returned by subscriber installation.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
///
/// Returns an error when the filter directive is invalid or a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => level_filter(&config.level)?,
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
}

/// Builds the filter used when `RUST_LOG` is unset.
///
/// # Errors
///
/// Returns [`ParseError`] for malformed directives.
pub fn level_filter(level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level)
}

#[cfg(test)]
mod tests {
    use super::level_filter;
    use rstest::rstest;

    #[rstest]
    #[case("info")]
    #[case("warn")]
    #[case("scriptorium=debug,info")]
    fn accepts_level_directives(#[case] level: &str) {
        assert!(level_filter(level).is_ok());
    }
}
