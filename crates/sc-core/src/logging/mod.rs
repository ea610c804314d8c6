//! Structured logging for sc-core.
//!
//! Events go to stderr only; stdout carries command payloads and, with
//! `render --stdout`, raw PDF bytes.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Crates whose events are shown by default.
const CRATES: [&str; 3] = ["sc_core", "sc_report", "sc_common"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Filter directive enabling `level` for the workspace crates only.
pub fn default_directive(level: LogLevel) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

fn output_layer(config: &LogConfig) -> BoxedLayer {
    match (config.format, config.timestamps) {
        (LogFormat::Jsonl, _) => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
            .boxed(),
        (LogFormat::Human, timestamps) => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            if timestamps {
                layer.boxed()
            } else {
                layer.without_time().boxed()
            }
        }
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, replaces the
/// level-derived filter.
///
/// A second call leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.level)));

    let _ = tracing_subscriber::registry()
        .with(output_layer(config))
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive(LogLevel::Warn),
            "sc_core=warn,sc_report=warn,sc_common=warn"
        );
        assert!(EnvFilter::try_new(default_directive(LogLevel::Off)).is_ok());
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        let config = LogConfig {
            format: LogFormat::Jsonl,
            level: LogLevel::Off,
            timestamps: false,
        };
        init_logging(&config);
        init_logging(&config);
        tracing::info!("dropped");
    }
}
