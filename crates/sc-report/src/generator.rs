//! Report generator implementation.

use crate::branding::load_branding;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::pdf;
use crate::sections::*;

use chrono::{Local, NaiveDateTime};
use sc_common::{validate, AnswerSet, ChecklistKind, InspectionMetadata, Submission};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// MIME type of rendered reports.
pub const PDF_MIME: &str = "application/pdf";

/// Complete report data structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    /// Checklist kind.
    pub kind: ChecklistKind,
    /// Generation timestamp (local time).
    pub generated_at: NaiveDateTime,
    /// Generator version.
    pub generator_version: String,
    /// Title, metadata table and legend.
    pub header: HeaderSection,
    /// Category tables.
    pub items: ItemsSection,
    /// Observations paragraph.
    pub observations: ObservationsBlock,
    /// Signature block.
    pub signatures: SignatureBlock,
    /// Generation footer.
    pub footer: FooterLine,
}

impl ReportData {
    /// Get the report title.
    pub fn title(&self) -> &str {
        &self.header.title
    }

    /// Number of rows carrying a marker.
    pub fn marked_rows(&self) -> usize {
        self.items
            .rows()
            .filter(|row| !row.marked_columns().is_empty())
            .count()
    }
}

/// A rendered report, ready to be saved or served.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// PDF bytes.
    pub bytes: Vec<u8>,
    /// Suggested download name.
    pub filename: String,
    /// Always [`PDF_MIME`].
    pub mime: &'static str,
    /// Number of pages.
    pub page_count: usize,
    /// Timestamp printed in the footer.
    pub generated_at: NaiveDateTime,
}

/// Suggested file name: `Checklist_<EPC|EPI>_<YYYYMMDD>_<employee>.pdf`.
///
/// Spaces and path separators in the employee name become `_`; a blank
/// name becomes `Usuario`.
pub fn suggested_filename(kind: ChecklistKind, metadata: &InspectionMetadata) -> String {
    let employee = metadata.employee.trim();
    let name = if employee.is_empty() {
        "Usuario".to_string()
    } else {
        employee
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                c => c,
            })
            .collect()
    };
    format!(
        "Checklist_{}_{}_{}.pdf",
        kind.short_label(),
        metadata.date.format("%Y%m%d"),
        name
    )
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Validate inputs and assemble the report sections.
    ///
    /// Validation runs before anything else; no section is built for an
    /// incomplete checklist.
    pub fn build(
        &self,
        kind: ChecklistKind,
        answers: &AnswerSet,
        metadata: &InspectionMetadata,
        generated_at: NaiveDateTime,
    ) -> Result<ReportData> {
        validate(metadata, answers)?;

        let items = ItemsSection::build(kind, answers)?;
        debug!(
            kind = %kind,
            answered = answers.answered_count(),
            tables = items.tables.len(),
            "Report sections built"
        );

        Ok(ReportData {
            kind,
            generated_at,
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            header: HeaderSection::build(kind, metadata),
            items,
            observations: ObservationsBlock::build(metadata),
            signatures: SignatureBlock::build(metadata),
            footer: FooterLine::build(generated_at, &self.config.system_name),
        })
    }

    /// Render a checklist stamped with the current local time.
    pub fn render(
        &self,
        kind: ChecklistKind,
        answers: &AnswerSet,
        metadata: &InspectionMetadata,
    ) -> Result<RenderedReport> {
        self.render_at(kind, answers, metadata, Local::now().naive_local())
    }

    /// Render a checklist with a fixed generation timestamp.
    ///
    /// Identical inputs and timestamp produce identical bytes.
    pub fn render_at(
        &self,
        kind: ChecklistKind,
        answers: &AnswerSet,
        metadata: &InspectionMetadata,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedReport> {
        self.config.validate()?;
        let data = self.build(kind, answers, metadata, generated_at)?;
        let branding = load_branding(&self.config.branding)?;
        let document = pdf::write_pdf(&data, &self.config, branding.as_ref())?;
        let filename = suggested_filename(kind, metadata);

        info!(
            kind = %kind,
            bytes = document.bytes.len(),
            pages = document.page_count,
            branding = branding.is_some(),
            filename = %filename,
            "Report generated"
        );

        Ok(RenderedReport {
            bytes: document.bytes,
            filename,
            mime: PDF_MIME,
            page_count: document.page_count,
            generated_at,
        })
    }

    /// Resolve and render a submission.
    pub fn render_submission(&self, submission: &Submission) -> Result<RenderedReport> {
        self.render_submission_at(submission, Local::now().naive_local())
    }

    /// Resolve and render a submission with a fixed generation timestamp.
    pub fn render_submission_at(
        &self,
        submission: &Submission,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedReport> {
        let answers = submission.answer_set()?;
        self.render_at(
            submission.kind,
            &answers,
            &submission.metadata,
            generated_at,
        )
    }

    /// Serialize assembled report data as JSON.
    pub fn to_json(&self, data: &ReportData) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}
