//! Logging configuration.
//!
//! Precedence, lowest first: built-in defaults, `SC_LOG` / `SC_LOG_FORMAT` /
//! `SC_LOG_TIMESTAMPS`, then `-v`/`-q`/`--log-format`. `RUST_LOG` bypasses
//! all of this and is handled in [`super::init_logging`].

use clap::ValueEnum;

/// Environment variable holding the log level.
pub const LEVEL_ENV: &str = "SC_LOG";
/// Environment variable holding the log format.
pub const FORMAT_ENV: &str = "SC_LOG_FORMAT";
/// Environment variable disabling timestamps when set to `0` or `false`.
pub const TIMESTAMPS_ENV: &str = "SC_LOG_TIMESTAMPS";

/// Log output format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Console lines for interactive use.
    #[default]
    Human,
    /// One JSON object per event.
    #[value(alias = "json")]
    Jsonl,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        })
    }
}

/// Minimum level of events that are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Level requested by `-q` and repeated `-v` flags, if any.
    pub fn from_flags(quiet: bool, verbose: u8) -> Option<LogLevel> {
        match (quiet, verbose) {
            (true, _) => Some(LogLevel::Error),
            (false, 0) => None,
            (false, 1) => Some(LogLevel::Debug),
            (false, _) => Some(LogLevel::Trace),
        }
    }

    fn parse(value: &str) -> Option<LogLevel> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" | "quiet" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        })
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Timestamps on human lines. JSON events always carry one.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Info,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Settings from the process environment with CLI overrides applied.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
            .with_overrides(cli_level, cli_format)
    }

    /// Settings from an environment lookup. Unparseable values are ignored.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = LogConfig::default();
        LogConfig {
            level: lookup(LEVEL_ENV)
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(defaults.level),
            format: lookup(FORMAT_ENV)
                .and_then(|v| LogFormat::from_str(v.trim(), true).ok())
                .unwrap_or(defaults.format),
            timestamps: lookup(TIMESTAMPS_ENV)
                .map(|v| !matches!(v.trim(), "0" | "false" | "no"))
                .unwrap_or(defaults.timestamps),
        }
    }

    fn with_overrides(mut self, level: Option<LogLevel>, format: Option<LogFormat>) -> Self {
        if let Some(level) = level {
            self.level = level;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }
}
