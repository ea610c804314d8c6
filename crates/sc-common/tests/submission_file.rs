//! Submission documents written to and read back from disk.

use chrono::NaiveDate;
use sc_common::{
    validate, ChecklistKind, Error, StatusCode, Submission, ValidationProblem, SCHEMA_VERSION,
};
use tempfile::tempdir;

fn june_2nd() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

#[test]
fn test_blank_template_survives_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("epc.json");

    let blank = Submission::blank(ChecklistKind::Epc, june_2nd());
    std::fs::write(&path, blank.to_json().unwrap()).unwrap();

    let loaded = Submission::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, blank);
    assert_eq!(loaded.schema_version, SCHEMA_VERSION);
    assert_eq!(loaded.answers.len(), 67);

    let answers = loaded.answer_set().unwrap();
    assert!(answers.is_empty());
    let err = validate(&loaded.metadata, &answers).unwrap_err();
    assert!(err.has(ValidationProblem::NoAnsweredItems));
    assert!(err.has(ValidationProblem::MissingResponsible));
}

#[test]
fn test_filled_template_resolves() {
    let mut submission = Submission::blank(ChecklistKind::Epi, june_2nd());
    submission.metadata.responsible = "Carlos Pereira".to_string();
    submission
        .answers
        .insert("Protetor solar".to_string(), Some(" nr ".to_string()));
    submission
        .answers
        .insert("Jugular para capacete".to_string(), Some(String::new()));

    let answers = submission.answer_set().unwrap();
    assert_eq!(answers.answered_count(), 1);
    assert_eq!(answers.get("Protetor solar"), Some(StatusCode::NotReceived));
    assert!(validate(&submission.metadata, &answers).is_ok());

    let tally = answers.tally(ChecklistKind::Epi);
    assert_eq!(tally.count(StatusCode::NotReceived), 1);
    assert_eq!(tally.unanswered, 41);
}

#[test]
fn test_minimal_document_uses_defaults() {
    let json = r#"{"kind": "epi", "answers": {"Protetor solar": "C"}}"#;
    let submission = Submission::from_json(json).unwrap();
    assert_eq!(submission.metadata.company, "Rezende Energia");
    assert!(submission.metadata.responsible.is_empty());
}

#[test]
fn test_unknown_kind_is_json_error() {
    let err = Submission::from_json(r#"{"kind": "epx", "answers": {}}"#).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_unknown_item_rejected() {
    let json = r#"{"kind": "epc", "answers": {"Martelo": "A"}}"#;
    let err = Submission::from_json(json).unwrap().answer_set().unwrap_err();
    assert!(matches!(err, Error::UnknownItem { .. }));
}
