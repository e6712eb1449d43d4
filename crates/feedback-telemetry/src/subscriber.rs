//! Global `tracing` subscriber setup.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global subscriber.
///
/// `RUST_LOG` directives take precedence over `config.log_level`. Fails if
/// a global subscriber is already set.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    let (writer, ansi) = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| TelemetryError::LogFile {
                    path: path.display().to_string(),
                    source,
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.json_logs {
        // JSON output for log shipping
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        registry.with(json_layer).try_init()
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(ansi);
        registry.with(fmt_layer).try_init()
    };
    result.map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        log_file = ?config.log_file,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test per binary may install the global subscriber.
    #[test]
    fn test_init_writes_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.log");
        let config = TelemetryConfig::default()
            .with_log_file(&path)
            .with_log_level("info");

        init_telemetry(&config).unwrap();
        tracing::warn!(path = "feedbacks/1.md", "probe message");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Logging initialized"));
        assert!(contents.contains("probe message"));

        // A second install is refused rather than silently replacing the first.
        assert!(matches!(
            init_telemetry(&TelemetryConfig::default()),
            Err(TelemetryError::SubscriberInit(_))
        ));
    }

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = TelemetryConfig::default().with_log_file(dir.path().join("missing/dir/x.log"));

        assert!(matches!(
            init_telemetry(&config),
            Err(TelemetryError::LogFile { .. })
        ));
    }
}
