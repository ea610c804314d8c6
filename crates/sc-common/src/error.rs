//! Error types for the safety checklist.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for callers
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Status Code
//!   Reason: status "NR" is not valid for epc item "FACÃO 20 POL."
//!   Fix: Use one of the codes listed by 'sc-core catalog <kind>'.
//! ```
//!
//! # Machine-Facing Output
//!
//! ```json
//! {
//!   "code": 21,
//!   "category": "submission",
//!   "message": "status \"NR\" is not valid for epc item \"FACÃO 20 POL.\"",
//!   "recoverable": true,
//!   "context": { "item": "FACÃO 20 POL.", "status": "NR" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::catalog::ChecklistKind;
use crate::validate::ValidationError;

/// Result type alias for checklist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Report configuration errors.
    Config,
    /// Pre-render validation errors.
    Validation,
    /// Malformed submissions (unknown items, invalid codes).
    Submission,
    /// Document assembly errors.
    Render,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Submission => write!(f, "submission"),
            ErrorCategory::Render => write!(f, "render"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the safety checklist.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid report configuration: {0}")]
    InvalidConfig(String),

    // Validation errors (20)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Submission errors (21-29)
    #[error("status {code:?} is not valid for {kind} item {item:?}")]
    InvalidStatus {
        kind: ChecklistKind,
        item: String,
        code: String,
    },

    #[error("item {item:?} is not part of the {kind} catalog")]
    UnknownItem { kind: ChecklistKind, item: String },

    // Render errors (30-39)
    #[error("report rendering failed: {0}")]
    Render(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Validation and submission errors
    /// - 30-39: Render errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig(_) => 11,
            Error::Validation(_) => 20,
            Error::InvalidStatus { .. } => 21,
            Error::UnknownItem { .. } => 22,
            Error::Render(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidConfig(_) => ErrorCategory::Config,
            Error::Validation(_) => ErrorCategory::Validation,
            Error::InvalidStatus { .. } | Error::UnknownItem { .. } => ErrorCategory::Submission,
            Error::Render(_) => ErrorCategory::Render,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether the caller can fix the problem and try again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) | Error::InvalidConfig(_) => true,
            Error::Validation(_) => true,
            Error::InvalidStatus { .. } | Error::UnknownItem { .. } => true,
            // Layout failures are bugs, not input problems
            Error::Render(_) => false,
            Error::Io(_) | Error::Json(_) => true,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) | Error::InvalidConfig(_) => {
                "Check the report configuration file, or remove it to use built-in defaults."
            }
            Error::Validation(_) => {
                "Fill in the responsible party and answer at least one checklist item."
            }
            Error::InvalidStatus { .. } => {
                "Use one of the codes listed by 'sc-core catalog <kind>'."
            }
            Error::UnknownItem { .. } => {
                "Item names must match the catalog exactly. Start from 'sc-core template <kind>'."
            }
            Error::Render(_) => "Internal rendering problem. Report it with the submission file.",
            Error::Io(_) => "Check that the file exists and that the output directory is writable.",
            Error::Json(_) => "Invalid JSON in submission. Check syntax with 'jq . <file>'.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidConfig(_) => "Invalid Report Configuration",
            Error::Validation(_) => "Checklist Incomplete",
            Error::InvalidStatus { .. } => "Invalid Status Code",
            Error::UnknownItem { .. } => "Unknown Checklist Item",
            Error::Render(_) => "Report Rendering Failed",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., item name, code).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidStatus { kind, item, code } => {
                context.insert("kind".to_string(), serde_json::json!(kind));
                context.insert("item".to_string(), serde_json::json!(item));
                context.insert("status".to_string(), serde_json::json!(code));
            }
            Error::UnknownItem { kind, item } => {
                context.insert("kind".to_string(), serde_json::json!(kind));
                context.insert("item".to_string(), serde_json::json!(item));
            }
            Error::Validation(v) => {
                context.insert("problems".to_string(), serde_json::json!(v.problems()));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
