//! Header section: title, metadata table and legend.

use sc_common::{ChecklistKind, InspectionMetadata};
use serde::{Deserialize, Serialize};

/// Number of columns in the metadata table.
pub const METADATA_COLUMNS: usize = 5;

/// Title block, metadata summary and status legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderSection {
    /// Document title naming the checklist kind.
    pub title: String,
    /// Metadata table, row-major. Columns 0 and 2 are labels, column 4 is
    /// the highlighted overall status column.
    pub metadata_rows: Vec<[String; METADATA_COLUMNS]>,
    /// Legend line enumerating the status codes.
    pub legend: String,
}

impl HeaderSection {
    /// Build the header for a kind.
    ///
    /// Vehicle fields only exist on the EPC sheet; they print blank on EPI
    /// reports whatever the metadata holds.
    pub fn build(kind: ChecklistKind, metadata: &InspectionMetadata) -> Self {
        let vehicle_field = |value: &str| match kind {
            ChecklistKind::Epc => value.to_string(),
            ChecklistKind::Epi => String::new(),
        };

        let metadata_rows = vec![
            [
                "Local:".to_string(),
                metadata.location.clone(),
                "Data:".to_string(),
                metadata.date_display(),
                "Status Geral".to_string(),
            ],
            [
                "Empresa:".to_string(),
                metadata.company.clone(),
                "Placa:".to_string(),
                vehicle_field(&metadata.plate),
                kind.plural_label().to_string(),
            ],
            [
                "Veículo:".to_string(),
                vehicle_field(&metadata.vehicle),
                "Modelo:".to_string(),
                vehicle_field(&metadata.model),
                metadata.result.label().to_string(),
            ],
            [
                "Matrícula:".to_string(),
                metadata.registration.clone(),
                "Colaborador:".to_string(),
                metadata.employee.clone(),
                String::new(),
            ],
            [
                "Função:".to_string(),
                metadata.role.clone(),
                "Responsável:".to_string(),
                metadata.responsible.clone(),
                String::new(),
            ],
        ];

        HeaderSection {
            title: kind.title().to_string(),
            metadata_rows,
            legend: kind.legend(),
        }
    }

    /// Value cell next to a label (`"Colaborador:"`), if present.
    pub fn value_for(&self, label: &str) -> Option<&str> {
        self.metadata_rows.iter().find_map(|row| {
            if row[0] == label {
                Some(row[1].as_str())
            } else if row[2] == label {
                Some(row[3].as_str())
            } else {
                None
            }
        })
    }
}
