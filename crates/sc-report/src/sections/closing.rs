//! Closing blocks: observations, signatures and footer.

use chrono::NaiveDateTime;
use sc_common::InspectionMetadata;
use serde::{Deserialize, Serialize};

/// Heading above the signature block.
pub const SIGNATURES_HEADING: &str = "ASSINATURAS";

/// Free-text observations paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationsBlock {
    /// Full paragraph text, label included.
    pub text: String,
}

impl ObservationsBlock {
    pub fn build(metadata: &InspectionMetadata) -> Self {
        ObservationsBlock {
            text: format!("Observações: {}", metadata.observations.trim()),
        }
    }
}

/// One signature column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureColumn {
    /// Role above the line.
    pub title: String,
    /// Blank line to sign on.
    pub line: String,
    /// Date stamp below the line.
    pub date_line: String,
}

/// Two-column signature block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBlock {
    pub heading: String,
    pub columns: [SignatureColumn; 2],
}

impl SignatureBlock {
    pub fn build(metadata: &InspectionMetadata) -> Self {
        let column = |title: &str| SignatureColumn {
            title: title.to_string(),
            line: "_".repeat(30),
            date_line: format!("Data: {}", metadata.date_display()),
        };
        SignatureBlock {
            heading: SIGNATURES_HEADING.to_string(),
            columns: [column("Responsável pela Inspeção"), column("Operador")],
        }
    }
}

/// Generation footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLine {
    pub text: String,
}

impl FooterLine {
    pub fn build(generated_at: NaiveDateTime, system_name: &str) -> Self {
        FooterLine {
            text: format!(
                "Documento gerado em {} às {} | {}",
                generated_at.format("%d/%m/%Y"),
                generated_at.format("%H:%M"),
                system_name
            ),
        }
    }
}
