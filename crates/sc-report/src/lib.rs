//! PDF report renderer for EPC/EPI safety checklists.
//!
//! Turns an answered checklist plus its inspection metadata into a
//! paginated A4 PDF. Rendering is a pure function of its inputs and the
//! generation timestamp; nothing is written to disk here.
//!
//! # Sections
//!
//! - Header: optional branding image, title, metadata table, legend
//! - Items: one table per catalog category, one `X` per answered row
//! - Closing: observations, signature block, generation footer
//!
//! # Example
//!
//! ```no_run
//! use sc_common::{AnswerSet, ChecklistKind, InspectionMetadata, StatusCode};
//! use sc_report::{ReportConfig, ReportGenerator};
//!
//! let answers = AnswerSet::new().with("FACÃO 20 POL.", StatusCode::DoNotRelease);
//! let metadata = InspectionMetadata::default().with_responsible("Ana Souza");
//! let generator = ReportGenerator::new(ReportConfig::default());
//! let report = generator.render(ChecklistKind::Epc, &answers, &metadata).unwrap();
//! assert_eq!(report.mime, "application/pdf");
//! ```

pub mod branding;
pub mod config;
pub mod error;
pub mod generator;
pub mod pdf;
pub mod sections;

pub use branding::BrandingImage;
pub use config::{BrandingConfig, PageConfig, ReportConfig, ReportTheme};
pub use error::{ReportError, Result};
pub use generator::{suggested_filename, RenderedReport, ReportData, ReportGenerator};
