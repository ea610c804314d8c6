//! Report configuration resolution.
//!
//! Resolution order for the report config file:
//! 1. Explicit CLI flag (`--config`)
//! 2. `SAFETY_CHECKLIST_CONFIG` environment variable
//! 3. `$XDG_CONFIG_HOME/safety_checklist/report.json`
//! 4. `~/.config/safety_checklist/report.json` (platform config dir)
//! 5. Built-in defaults
//!
//! A branding path from `--branding` or `SC_BRANDING` replaces the one in
//! the file.

use std::fs;
use std::path::{Path, PathBuf};

use sc_common::{Error, Result};
use sc_report::ReportConfig;
use serde::Serialize;
use tracing::debug;

/// Environment variable naming the report config file.
pub const CONFIG_ENV: &str = "SAFETY_CHECKLIST_CONFIG";
/// Environment variable naming the branding image.
pub const BRANDING_ENV: &str = "SC_BRANDING";
/// Directory name under the user config dir.
pub const CONFIG_DIR_NAME: &str = "safety_checklist";
/// Config file name inside the config dir.
pub const CONFIG_FILE_NAME: &str = "report.json";

/// How a config file was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigResolution {
    /// From explicit CLI flag
    Cli,
    /// From environment variable
    Env,
    /// From XDG config directory
    Xdg,
    /// Using built-in defaults
    Default,
}

impl std::fmt::Display for ConfigResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigResolution::Cli => write!(f, "cli"),
            ConfigResolution::Env => write!(f, "env"),
            ConfigResolution::Xdg => write!(f, "xdg"),
            ConfigResolution::Default => write!(f, "default"),
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSource {
    /// Config file, or `None` for built-in defaults.
    pub path: Option<PathBuf>,
    /// How the file was found.
    pub resolution: ConfigResolution,
}

/// Paths given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// `--config`
    pub config_path: Option<PathBuf>,
    /// `--branding`
    pub branding_path: Option<PathBuf>,
}

/// Configuration resolver with deterministic resolution order.
pub struct ConfigResolver {
    cli_paths: ConfigPaths,
    env: fn(&str) -> Option<String>,
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

impl ConfigResolver {
    /// Create a new resolver with CLI paths.
    pub fn new(paths: ConfigPaths) -> Self {
        ConfigResolver {
            cli_paths: paths,
            env: process_env,
        }
    }

    /// Create a resolver with no CLI overrides.
    pub fn with_defaults() -> Self {
        Self::new(ConfigPaths::default())
    }

    /// Replace the environment lookup.
    pub fn with_env(mut self, env: fn(&str) -> Option<String>) -> Self {
        self.env = env;
        self
    }

    /// Resolve the config file path.
    pub fn resolve_config_path(&self) -> (Option<PathBuf>, ConfigResolution) {
        // 1. CLI flag
        if let Some(ref path) = self.cli_paths.config_path {
            return (Some(path.clone()), ConfigResolution::Cli);
        }

        // 2. Environment variable
        if let Some(path) = (self.env)(CONFIG_ENV) {
            return (Some(PathBuf::from(path)), ConfigResolution::Env);
        }

        // 3./4. Config dir, only when the file exists
        if let Some(dir) = self.resolve_config_dir() {
            let path = dir.join(CONFIG_FILE_NAME);
            if path.is_file() {
                return (Some(path), ConfigResolution::Xdg);
            }
        }

        (None, ConfigResolution::Default)
    }

    /// Resolve the config directory.
    pub fn resolve_config_dir(&self) -> Option<PathBuf> {
        if let Some(xdg) = (self.env)("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join(CONFIG_DIR_NAME));
        }
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME))
    }

    /// Branding override from CLI or environment.
    pub fn resolve_branding(&self) -> Option<PathBuf> {
        self.cli_paths
            .branding_path
            .clone()
            .or_else(|| (self.env)(BRANDING_ENV).map(PathBuf::from))
    }

    /// Load the report configuration.
    ///
    /// An explicitly named file (flag or env) must exist; the config dir
    /// file is optional.
    pub fn load(&self) -> Result<(ReportConfig, ConfigSource)> {
        let (path, resolution) = self.resolve_config_path();

        let mut config = match &path {
            Some(p) => load_file(p)?,
            None => ReportConfig::default(),
        };

        if let Some(branding) = self.resolve_branding() {
            debug!(path = %branding.display(), "Branding path override");
            config.branding.path = Some(branding);
        }

        config
            .validate()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        debug!(
            source = %resolution,
            path = ?path,
            "Report configuration resolved"
        );
        Ok((config, ConfigSource { path, resolution }))
    }
}

fn load_file(path: &Path) -> Result<ReportConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "failed to read report config from {}: {}",
            path.display(),
            e
        ))
    })?;
    ReportConfig::from_json(&content)
        .map_err(|e| Error::InvalidConfig(format!("failed to parse {}: {}", path.display(), e)))
}
