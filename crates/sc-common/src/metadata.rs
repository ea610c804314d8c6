//! Inspection metadata printed in the report header.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Company name pre-filled on new checklists.
pub const DEFAULT_COMPANY: &str = "Rezende Energia";

/// Overall inspection outcome chosen by the inspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionResult {
    /// Aprovado.
    #[default]
    Approved,
    /// Reprovado.
    Rejected,
    /// Aprovado com Restrições.
    ApprovedWithRestrictions,
}

impl InspectionResult {
    /// Label as printed on the report.
    pub fn label(&self) -> &'static str {
        match self {
            InspectionResult::Approved => "Aprovado",
            InspectionResult::Rejected => "Reprovado",
            InspectionResult::ApprovedWithRestrictions => "Aprovado com Restrições",
        }
    }
}

impl std::fmt::Display for InspectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Free-text and date fields entered alongside the checklist.
///
/// Only `responsible` is required (see [`crate::validate`]); everything else
/// prints blank when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionMetadata {
    /// Local.
    #[serde(default)]
    pub location: String,
    /// Inspection date.
    #[serde(default = "today")]
    pub date: NaiveDate,
    /// Empresa.
    #[serde(default = "default_company")]
    pub company: String,
    /// Vehicle plate (EPC only; blank on EPI sheets).
    #[serde(default)]
    pub plate: String,
    /// Vehicle description (EPC only).
    #[serde(default)]
    pub vehicle: String,
    /// Vehicle model (EPC only).
    #[serde(default)]
    pub model: String,
    /// Matrícula of the inspected employee.
    #[serde(default)]
    pub registration: String,
    /// Colaborador.
    #[serde(default)]
    pub employee: String,
    /// Função/Cargo.
    #[serde(default)]
    pub role: String,
    /// Responsável pela Inspeção.
    #[serde(default)]
    pub responsible: String,
    /// Observações.
    #[serde(default)]
    pub observations: String,
    /// Resultado da Inspeção.
    #[serde(default)]
    pub result: InspectionResult,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_company() -> String {
    DEFAULT_COMPANY.to_string()
}

impl Default for InspectionMetadata {
    fn default() -> Self {
        Self::new(today())
    }
}

impl InspectionMetadata {
    /// Blank metadata for the given date, with the default company.
    pub fn new(date: NaiveDate) -> Self {
        InspectionMetadata {
            location: String::new(),
            date,
            company: default_company(),
            plate: String::new(),
            vehicle: String::new(),
            model: String::new(),
            registration: String::new(),
            employee: String::new(),
            role: String::new(),
            responsible: String::new(),
            observations: String::new(),
            result: InspectionResult::default(),
        }
    }

    /// Set the responsible party.
    pub fn with_responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = responsible.into();
        self
    }

    /// Set the inspected employee.
    pub fn with_employee(mut self, employee: impl Into<String>) -> Self {
        self.employee = employee.into();
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the observations text.
    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = observations.into();
        self
    }

    /// Set the overall result.
    pub fn with_result(mut self, result: InspectionResult) -> Self {
        self.result = result;
        self
    }

    /// Date as printed on the report (`DD/MM/YYYY`).
    pub fn date_display(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}
