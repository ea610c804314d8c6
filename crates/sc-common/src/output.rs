//! Payload formats for command output on stdout.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a command prints its result.
///
/// Errors follow the same choice: a structured JSON object on stdout for
/// `json`, a human message on stderr otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    /// Markdown, Portuguese labels
    #[value(alias = "markdown")]
    Md,
    /// Single line
    Summary,
}

impl OutputFormat {
    /// Whether errors should be emitted as structured JSON.
    pub fn is_machine(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Md => "md",
            OutputFormat::Summary => "summary",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(OutputFormat::from_str("markdown", true), Ok(OutputFormat::Md));
        assert_eq!(OutputFormat::from_str("SUMMARY", true), Ok(OutputFormat::Summary));
        assert!(OutputFormat::Json.is_machine());
        assert!(!OutputFormat::Md.is_machine());
    }
}
