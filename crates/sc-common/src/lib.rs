//! Safety checklist common types and errors.
//!
//! This crate provides the data shared by the renderer and the CLI:
//! - Fixed EPC/EPI catalogs (categories and items, in print order)
//! - Per-kind status codes and their legend labels
//! - Answer sets, submissions and inspection metadata
//! - Pre-render validation and status tallies
//! - Common error types and output format specifications

pub mod answers;
pub mod catalog;
pub mod error;
pub mod metadata;
pub mod output;
pub mod status;
pub mod validate;

pub use answers::{AnswerSet, StatusTally, Submission};
pub use catalog::{Catalog, Category, ChecklistKind};
pub use error::{Error, Result};
pub use metadata::{InspectionMetadata, InspectionResult};
pub use output::OutputFormat;
pub use status::StatusCode;
pub use validate::{validate, ValidationError, ValidationProblem};

/// Schema version of the submission document.
pub const SCHEMA_VERSION: &str = "1.0.0";
