//! Error types for report generation.

use sc_common::{ChecklistKind, ValidationError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
///
/// No variant is ever returned together with partial output.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Required fields missing; generation was not attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An answer carries a status outside the kind's status set.
    #[error("status {code:?} is not valid for {kind} item {item:?}")]
    InvalidStatus {
        kind: ChecklistKind,
        item: String,
        code: String,
    },

    /// An answer names an item that is not in the kind's catalog.
    #[error("item {item:?} is not part of the {kind} catalog")]
    UnknownItem { kind: ChecklistKind, item: String },

    /// Branding image unusable while marked as required.
    #[error("branding image {path:?} unusable: {reason}")]
    Asset { path: PathBuf, reason: String },

    /// Document assembly error.
    #[error("PDF assembly failed: {0}")]
    Layout(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<sc_common::Error> for ReportError {
    fn from(err: sc_common::Error) -> Self {
        match err {
            sc_common::Error::Validation(v) => ReportError::Validation(v),
            sc_common::Error::InvalidStatus { kind, item, code } => {
                ReportError::InvalidStatus { kind, item, code }
            }
            sc_common::Error::UnknownItem { kind, item } => ReportError::UnknownItem { kind, item },
            sc_common::Error::Config(msg) | sc_common::Error::InvalidConfig(msg) => {
                ReportError::InvalidConfig(msg)
            }
            sc_common::Error::Render(msg) => ReportError::Layout(msg),
            sc_common::Error::Io(e) => ReportError::IoError(e),
            sc_common::Error::Json(e) => ReportError::JsonError(e),
        }
    }
}

impl From<ReportError> for sc_common::Error {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Validation(v) => sc_common::Error::Validation(v),
            ReportError::InvalidStatus { kind, item, code } => {
                sc_common::Error::InvalidStatus { kind, item, code }
            }
            ReportError::UnknownItem { kind, item } => sc_common::Error::UnknownItem { kind, item },
            ReportError::InvalidConfig(msg) => sc_common::Error::InvalidConfig(msg),
            ReportError::JsonError(e) => sc_common::Error::Json(e),
            ReportError::IoError(e) => sc_common::Error::Io(e),
            other @ (ReportError::Asset { .. } | ReportError::Layout(_)) => {
                sc_common::Error::Render(other.to_string())
            }
        }
    }
}
