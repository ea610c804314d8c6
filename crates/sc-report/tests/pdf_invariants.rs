//! PDF report invariant tests.
//!
//! These tests inspect the generated PDF without a viewer. Content streams
//! are left uncompressed so text operators can be matched directly:
//! - Exactly one `X` marker per answered item
//! - Identical inputs and timestamp give identical bytes
//! - Incomplete checklists produce no document
//! - Branding image is optional unless required

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use sc_common::{AnswerSet, Catalog, ChecklistKind, InspectionMetadata, StatusCode, Submission};
use sc_report::pdf::text::encode_win_ansi;
use sc_report::{ReportConfig, ReportError, ReportGenerator};
use tempfile::tempdir;

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn metadata() -> InspectionMetadata {
    InspectionMetadata::new(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())
        .with_responsible("Carlos Pereira")
        .with_employee("Maria Oliveira")
        .with_location("Base Norte")
        .with_observations("Equipamentos conferidos na saída da base.")
}

fn plain_generator() -> ReportGenerator {
    ReportGenerator::new(ReportConfig::default().with_compression(false))
}

fn as_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn count_shown(pdf: &str, literal: &str) -> usize {
    let pattern = format!(r"\({}\)\s*Tj", regex::escape(literal));
    Regex::new(&pattern).unwrap().find_iter(pdf).count()
}

// ============================================================================
// Document structure
// ============================================================================

#[test]
fn test_pdf_header_and_trailer() {
    let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::Good);
    let report = plain_generator()
        .render_at(ChecklistKind::Epc, &answers, &metadata(), generated_at())
        .unwrap();

    assert!(report.bytes.starts_with(b"%PDF-"));
    let text = as_text(&report.bytes);
    assert!(text.trim_end().ends_with("%%EOF"));
    assert!(text.contains("/BaseFont /Helvetica"));
    assert!(text.contains("/WinAnsiEncoding"));
    assert_eq!(report.mime, "application/pdf");
}

#[test]
fn test_page_objects_match_page_count() {
    let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::Good);
    let report = plain_generator()
        .render_at(ChecklistKind::Epc, &answers, &metadata(), generated_at())
        .unwrap();

    let pages = Regex::new(r"/Type /Page\b[^s]").unwrap();
    let text = as_text(&report.bytes);
    assert_eq!(pages.find_iter(&text).count(), report.page_count);
    // 67 rows across six tables do not fit on one A4 page
    assert!(report.page_count >= 2);
}

#[test]
fn test_sections_present() {
    let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::RequestAction);
    let report = plain_generator()
        .render_at(ChecklistKind::Epc, &answers, &metadata(), generated_at())
        .unwrap();
    let text = as_text(&report.bytes);

    assert_eq!(count_shown(&text, "BANDEIROLA"), 1);
    assert_eq!(count_shown(&text, "ASSINATURAS"), 1);
    assert_eq!(count_shown(&text, "Operador"), 1);
    assert_eq!(count_shown(&text, "Carlos Pereira"), 1);
    assert_eq!(count_shown(&text, "Base Norte"), 1);
    assert_eq!(count_shown(&text, "Data: 02/06/2025"), 2);
}

/// Pattern for a `Tj` showing exactly `text`, in literal or hex form.
fn shown_pattern(text: &str) -> Regex {
    let bytes = encode_win_ansi(text);
    let pattern = if bytes.is_ascii() {
        let mut literal = String::from(r"\(");
        for c in text.chars() {
            if matches!(c, '(' | ')' | '\\') {
                literal.push_str(r"\\?");
            }
            literal.push_str(&regex::escape(&c.to_string()));
        }
        literal.push_str(r"\)\s*Tj");
        literal
    } else {
        let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
        format!(r"(?i)<{}>\s*Tj", hex)
    };
    Regex::new(&pattern).unwrap()
}

/// Every catalog item answered, cycling through the kind's statuses.
fn full_answers(kind: ChecklistKind) -> AnswerSet {
    let statuses = kind.statuses();
    Catalog::for_kind(kind)
        .items()
        .enumerate()
        .fold(AnswerSet::new(), |answers, (i, (_, item))| {
            answers.with(item, statuses[i % statuses.len()])
        })
}

// ============================================================================
// Markers
// ============================================================================

#[test]
fn test_full_catalog_one_marker_per_row() {
    for &kind in ChecklistKind::all() {
        let answers = full_answers(kind);
        let catalog = Catalog::for_kind(kind);
        let generator = plain_generator();

        let data = generator
            .build(kind, &answers, &metadata(), generated_at())
            .unwrap();
        for table in &data.items.tables {
            for row in &table.rows {
                let marked = row.marked_columns();
                assert_eq!(marked.len(), 1, "{}", row.item);
                let status = answers.get(&row.item).unwrap();
                assert_eq!(table.status_columns[marked[0]], status.code(), "{}", row.item);
            }
        }
        assert_eq!(data.marked_rows(), catalog.item_count());

        let report = generator
            .render_at(kind, &answers, &metadata(), generated_at())
            .unwrap();
        assert_eq!(count_shown(&as_text(&report.bytes), "X"), catalog.item_count());
    }
}

#[test]
fn test_items_printed_in_catalog_order() {
    for &kind in ChecklistKind::all() {
        let report = plain_generator()
            .render_at(kind, &full_answers(kind), &metadata(), generated_at())
            .unwrap();
        let text = as_text(&report.bytes);

        let mut previous = 0;
        for (_, item) in Catalog::for_kind(kind).items() {
            let found = shown_pattern(item)
                .find(&text)
                .unwrap_or_else(|| panic!("{} not shown", item));
            assert!(found.start() > previous, "{} out of order", item);
            previous = found.start();
        }
    }
}

#[test]
fn test_one_marker_per_answer() {
    let answers = AnswerSet::new()
        .with("FACÃO 20 POL.", StatusCode::DoNotRelease)
        .with("BANDEIROLA", StatusCode::Good)
        .with("KIT PRIMEIROS SOCORROS", StatusCode::RequestAction)
        .with("BANQUETA ISOLADA", StatusCode::Good);
    let report = plain_generator()
        .render_at(ChecklistKind::Epc, &answers, &metadata(), generated_at())
        .unwrap();

    assert_eq!(count_shown(&as_text(&report.bytes), "X"), 4);
}

#[test]
fn test_epi_markers() {
    let answers = AnswerSet::new()
        .with("Jugular para capacete", StatusCode::Conforming)
        .with("Protetor solar", StatusCode::NotApplicable);
    let report = plain_generator()
        .render_at(ChecklistKind::Epi, &answers, &metadata(), generated_at())
        .unwrap();

    assert_eq!(count_shown(&as_text(&report.bytes), "X"), 2);
}

#[test]
fn test_faco_marker_in_c_column() {
    let answers = AnswerSet::new().with("FACÃO 20 POL.", StatusCode::DoNotRelease);
    let data = plain_generator()
        .build(ChecklistKind::Epc, &answers, &metadata(), generated_at())
        .unwrap();

    let table = data
        .items
        .tables
        .iter()
        .find(|t| t.rows.iter().any(|r| r.item == "FACÃO 20 POL."))
        .unwrap();
    let row = data.items.row("FACÃO 20 POL.").unwrap();
    let marked = row.marked_columns();
    assert_eq!(marked.len(), 1);
    assert_eq!(table.status_columns[marked[0]], "C");
    assert_eq!(data.marked_rows(), 1);
}

#[test]
fn test_unanswered_capacete_has_no_marker() {
    let answers = AnswerSet::new().with("Jugular para capacete", StatusCode::NonConforming);
    let data = plain_generator()
        .build(ChecklistKind::Epi, &answers, &metadata(), generated_at())
        .unwrap();

    let row = data.items.row("Capacete de segurança classe B").unwrap();
    assert!(row.marked_columns().is_empty());
    assert!(row.status_cells().all(str::is_empty));
}

// ============================================================================
// Overflow
// ============================================================================

#[test]
fn test_long_metadata_value_kept_on_page() {
    let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::Good);
    let meta = metadata().with_location("Rua ".repeat(2000));
    let report = plain_generator()
        .render_at(ChecklistKind::Epc, &answers, &meta, generated_at())
        .unwrap();
    let text = as_text(&report.bytes);
    assert!(report.page_count > 2);

    // Lowest text is the page number, half the default bottom margin up
    let positions = Regex::new(r"(-?[0-9.]+)\s+(-?[0-9.]+)\s+Td").unwrap();
    for caps in positions.captures_iter(&text) {
        let y: f32 = caps[2].parse().unwrap();
        assert!(y >= 35.99, "text drawn at y={}", y);
    }

    let shown = Regex::new(r"\(([^()]*)\)\s*Tj").unwrap();
    let words: usize = shown
        .captures_iter(&text)
        .map(|caps| caps[1].matches("Rua").count())
        .sum();
    assert_eq!(words, 2000);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_identical_inputs_identical_bytes() {
    let answers = AnswerSet::new()
        .with("Capacete de segurança classe B", StatusCode::Conforming)
        .with("Protetor solar", StatusCode::NotReceived);
    let generator = ReportGenerator::default_config();

    let first = generator
        .render_at(ChecklistKind::Epi, &answers, &metadata(), generated_at())
        .unwrap();
    let second = generator
        .render_at(ChecklistKind::Epi, &answers, &metadata(), generated_at())
        .unwrap();

    assert_eq!(first.bytes, second.bytes);
    assert_eq!(first.filename, second.filename);
}

#[test]
fn test_timestamp_changes_output() {
    let answers = AnswerSet::new().with("Protetor solar", StatusCode::Conforming);
    let generator = ReportGenerator::default_config();
    let later = generated_at() + chrono::Duration::minutes(1);

    let first = generator
        .render_at(ChecklistKind::Epi, &answers, &metadata(), generated_at())
        .unwrap();
    let second = generator
        .render_at(ChecklistKind::Epi, &answers, &metadata(), later)
        .unwrap();

    assert_ne!(first.bytes, second.bytes);
}

// ============================================================================
// Rejected input
// ============================================================================

#[test]
fn test_no_answers_is_validation_error() {
    let err = plain_generator()
        .render_at(
            ChecklistKind::Epc,
            &AnswerSet::new(),
            &metadata(),
            generated_at(),
        )
        .unwrap_err();
    assert!(matches!(err, ReportError::Validation(_)));
}

#[test]
fn test_blank_responsible_is_validation_error() {
    let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::Good);
    let meta = metadata().with_responsible("   ");
    let err = plain_generator()
        .render_at(ChecklistKind::Epc, &answers, &meta, generated_at())
        .unwrap_err();
    assert!(matches!(err, ReportError::Validation(_)));
}

#[test]
fn test_wrong_kind_status_rejected() {
    let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::NotReceived);
    let err = plain_generator()
        .render_at(ChecklistKind::Epc, &answers, &metadata(), generated_at())
        .unwrap_err();
    assert!(matches!(err, ReportError::InvalidStatus { .. }));
}

#[test]
fn test_submission_with_unknown_code_rejected() {
    let json = r#"{
        "kind": "epi",
        "metadata": {"responsible": "Carlos Pereira", "date": "2025-06-02"},
        "answers": {"Protetor solar": "A"}
    }"#;
    let submission = Submission::from_json(json).unwrap();
    let err = plain_generator()
        .render_submission_at(&submission, generated_at())
        .unwrap_err();
    assert!(matches!(err, ReportError::InvalidStatus { .. }));
}

#[test]
fn test_submission_renders() {
    let json = r#"{
        "kind": "epi",
        "metadata": {
            "responsible": "Carlos Pereira",
            "employee": "Maria Oliveira",
            "date": "2025-06-02"
        },
        "answers": {"Protetor solar": "nc", "Jugular para capacete": null}
    }"#;
    let submission = Submission::from_json(json).unwrap();
    let report = plain_generator()
        .render_submission_at(&submission, generated_at())
        .unwrap();

    assert_eq!(report.filename, "Checklist_EPI_20250602_Maria_Oliveira.pdf");
    assert_eq!(count_shown(&as_text(&report.bytes), "X"), 1);
}

// ============================================================================
// Branding
// ============================================================================

#[test]
fn test_missing_branding_renders_without_image() {
    let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::Good);
    let config = ReportConfig::default()
        .with_compression(false)
        .with_branding("/nonexistent/logo.png");
    let report = ReportGenerator::new(config)
        .render_at(ChecklistKind::Epc, &answers, &metadata(), generated_at())
        .unwrap();

    assert!(!as_text(&report.bytes).contains("/Image"));
}

#[test]
fn test_missing_branding_required_fails() {
    let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::Good);
    let config = ReportConfig::default()
        .with_branding("/nonexistent/logo.png")
        .with_branding_required(true);
    let err = ReportGenerator::new(config)
        .render_at(ChecklistKind::Epc, &answers, &metadata(), generated_at())
        .unwrap_err();

    assert!(matches!(err, ReportError::Asset { .. }));
}

#[test]
fn test_branding_embedded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logo.png");
    image::RgbaImage::from_pixel(8, 4, image::Rgba([247, 147, 30, 200]))
        .save(&path)
        .unwrap();

    let answers = AnswerSet::new().with("BANDEIROLA", StatusCode::Good);
    let config = ReportConfig::default()
        .with_compression(false)
        .with_branding(&path);
    let report = ReportGenerator::new(config)
        .render_at(ChecklistKind::Epc, &answers, &metadata(), generated_at())
        .unwrap();

    let text = as_text(&report.bytes);
    assert!(Regex::new(r"/Subtype /Image").unwrap().is_match(&text));
    assert!(text.contains("/SMask"));
    assert!(Regex::new(r"/Im1 Do").unwrap().is_match(&text));
}
