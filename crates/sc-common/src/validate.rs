//! Pre-render validation.
//!
//! A report may only be generated when a responsible party is named and at
//! least one item carries a status. Nothing else is checked.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::answers::AnswerSet;
use crate::metadata::InspectionMetadata;

/// A single reason a checklist is not ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationProblem {
    /// `responsible` is empty or whitespace.
    MissingResponsible,
    /// No item has a status.
    NoAnsweredItems,
}

impl ValidationProblem {
    /// Human-readable description.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationProblem::MissingResponsible => "responsible party is missing",
            ValidationProblem::NoAnsweredItems => "no checklist item has a status",
        }
    }
}

impl std::fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Required fields missing before generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("checklist incomplete: {}", join_problems(.problems))]
pub struct ValidationError {
    problems: Vec<ValidationProblem>,
}

fn join_problems(problems: &[ValidationProblem]) -> String {
    problems
        .iter()
        .map(ValidationProblem::message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Wrap a non-empty list of problems.
    pub fn new(problems: Vec<ValidationProblem>) -> Self {
        ValidationError { problems }
    }

    /// All problems found, in check order.
    pub fn problems(&self) -> &[ValidationProblem] {
        &self.problems
    }

    /// Whether a specific problem was found.
    pub fn has(&self, problem: ValidationProblem) -> bool {
        self.problems.contains(&problem)
    }
}

/// Check that a checklist may be rendered.
///
/// Reports every problem at once rather than stopping at the first.
pub fn validate(
    metadata: &InspectionMetadata,
    answers: &AnswerSet,
) -> std::result::Result<(), ValidationError> {
    let mut problems = Vec::new();

    if metadata.responsible.trim().is_empty() {
        problems.push(ValidationProblem::MissingResponsible);
    }
    if answers.is_empty() {
        problems.push(ValidationProblem::NoAnsweredItems);
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(problems))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusCode;
    use chrono::NaiveDate;

    fn meta(responsible: &str) -> InspectionMetadata {
        InspectionMetadata::new(NaiveDate::from_ymd_opt(2025, 5, 20).unwrap())
            .with_responsible(responsible)
    }

    #[test]
    fn test_valid_checklist() {
        let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::Good);
        assert!(validate(&meta("Marcos"), &answers).is_ok());
    }

    #[test]
    fn test_whitespace_responsible_is_missing() {
        let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::Good);
        let err = validate(&meta("   "), &answers).unwrap_err();
        assert_eq!(err.problems(), &[ValidationProblem::MissingResponsible]);
    }

    #[test]
    fn test_no_answers() {
        let err = validate(&meta("Marcos"), &AnswerSet::new()).unwrap_err();
        assert!(err.has(ValidationProblem::NoAnsweredItems));
        assert!(!err.has(ValidationProblem::MissingResponsible));
    }

    #[test]
    fn test_both_problems_reported() {
        let err = validate(&meta(""), &AnswerSet::new()).unwrap_err();
        assert_eq!(err.problems().len(), 2);
        assert_eq!(
            err.to_string(),
            "checklist incomplete: responsible party is missing; no checklist item has a status"
        );
    }
}
