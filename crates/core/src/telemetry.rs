use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("could not install tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.trim().to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt().with_target(false).with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|error| TelemetryError::Install(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::init_logging;
    use crate::config::{LogFormat, LoggingConfig};

    #[test]
    fn second_install_reports_an_error_instead_of_panicking() {
        let config = LoggingConfig { level: "warn".to_string(), format: LogFormat::Compact };

        let _ = init_logging(&config);
        let second = init_logging(&LoggingConfig { format: LogFormat::Json, ..config });

        assert!(second.is_err());
    }
}
