//! CLI tests for sc-core.
//!
//! These tests run the binary end to end: argument errors, catalog and
//! template output, validation exit codes and PDF rendering.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

/// Get a Command for the sc-core binary.
fn sc_core() -> Command {
    let mut cmd = Command::cargo_bin("sc-core").expect("sc-core binary should exist");
    cmd.env_remove("SAFETY_CHECKLIST_CONFIG")
        .env_remove("SC_BRANDING")
        .env_remove("RUST_LOG")
        .env("SC_LOG", "error");
    cmd
}

const COMPLETE_EPI: &str = r#"{
    "kind": "epi",
    "metadata": {
        "date": "2025-06-02",
        "employee": "Maria Oliveira",
        "responsible": "Carlos Pereira",
        "role": "Eletricista"
    },
    "answers": {
        "Capacete de segurança classe B": "C",
        "Protetor solar": "NR",
        "Jugular para capacete": null
    }
}"#;

const NO_RESPONSIBLE_EPC: &str = r#"{
    "kind": "epc",
    "metadata": {"date": "2025-06-02"},
    "answers": {"FACÃO 20 POL.": "C"}
}"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Arguments
// ============================================================================

mod arguments {
    use super::*;

    #[test]
    fn unknown_command_exits_10() {
        sc_core()
            .arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn unknown_kind_exits_10() {
        sc_core().args(["catalog", "epx"]).assert().code(10);
    }

    #[test]
    fn help_exits_0() {
        sc_core()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("render"));
    }

    #[test]
    fn version_json() {
        sc_core()
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"sc_core_version\""))
            .stdout(predicate::str::contains("\"catalog_version\": \"2.0\""));
    }
}

// ============================================================================
// Catalog and template
// ============================================================================

mod catalog {
    use super::*;

    #[test]
    fn epc_summary() {
        sc_core()
            .args(["catalog", "epc", "--format", "summary"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("EPC: 6 categories, 67 items"));
    }

    #[test]
    fn epi_json_lists_statuses() {
        let output = sc_core().args(["catalog", "epi"]).output().unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["item_count"], 42);
        assert_eq!(json["statuses"][2]["code"], "NR");
        assert_eq!(json["categories"][0]["name"], "Proteção da Cabeça");
    }

    #[test]
    fn epi_markdown() {
        sc_core()
            .args(["catalog", "epi", "-f", "md"])
            .assert()
            .success()
            .stdout(predicate::str::contains("## Proteção da Cabeça"))
            .stdout(predicate::str::contains("Legenda: C = Conforme"));
    }

    #[test]
    fn template_has_every_item_unanswered() {
        let output = sc_core()
            .args(["template", "epi", "--date", "2025-06-02"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let answers = json["answers"].as_object().unwrap();
        assert_eq!(answers.len(), 42);
        assert!(answers.values().all(|v| v.is_null()));
        assert_eq!(json["metadata"]["company"], "Rezende Energia");
        assert_eq!(json["metadata"]["date"], "2025-06-02");
    }

    #[test]
    fn template_to_file_validates_as_incomplete() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("epc.json");
        sc_core()
            .args(["template", "epc", "-o"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"items\": 67"));

        sc_core()
            .arg("validate")
            .arg(&path)
            .assert()
            .code(11)
            .stdout(predicate::str::contains("no_answered_items"))
            .stdout(predicate::str::contains("missing_responsible"));
    }
}

// ============================================================================
// Validate and stats
// ============================================================================

mod validate {
    use super::*;

    #[test]
    fn complete_submission_is_valid() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "epi.json", COMPLETE_EPI);
        sc_core()
            .args(["validate", "-f", "summary"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("EPI: ok (2/42)"));
    }

    #[test]
    fn missing_responsible_exits_11() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "epc.json", NO_RESPONSIBLE_EPC);
        sc_core()
            .arg("validate")
            .arg(&path)
            .assert()
            .code(11)
            .stdout(predicate::str::contains("\"valid\": false"))
            .stdout(predicate::str::contains("missing_responsible"));
    }

    #[test]
    fn stdin_submission() {
        sc_core()
            .args(["validate", "-"])
            .write_stdin(COMPLETE_EPI)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"valid\": true"));
    }

    #[test]
    fn wrong_kind_code_exits_12() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "epc.json",
            r#"{"kind": "epc", "answers": {"BANDEIROLA": "NR"}}"#,
        );
        sc_core()
            .arg("validate")
            .arg(&path)
            .assert()
            .code(12)
            .stdout(predicate::str::contains("\"exit_code\":\"ERR_SUBMISSION\""));
    }

    #[test]
    fn unknown_item_exits_12() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "epc.json",
            r#"{"kind": "epc", "answers": {"Martelo": "A"}}"#,
        );
        sc_core()
            .args(["validate", "-f", "md"])
            .arg(&path)
            .assert()
            .code(12)
            .stderr(predicate::str::contains("Unknown Checklist Item"));
    }

    #[test]
    fn malformed_json_exits_12() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "bad.json", "{ not json");
        sc_core().arg("validate").arg(&path).assert().code(12);
    }

    #[test]
    fn missing_file_exits_21() {
        sc_core()
            .args(["validate", "/nonexistent/submission.json"])
            .assert()
            .code(21);
    }

    #[test]
    fn stats_counts_statuses() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "epi.json", COMPLETE_EPI);
        sc_core()
            .args(["stats", "-f", "summary"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "EPI: C=1 NC=0 NR=1 N/A=0 (2/42 answered)",
            ));
    }
}

// ============================================================================
// Render
// ============================================================================

mod render {
    use super::*;

    #[test]
    fn writes_pdf_under_suggested_name() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "epi.json", COMPLETE_EPI);
        let out_dir = dir.path().join("out");

        sc_core()
            .arg("render")
            .arg(&path)
            .arg("--out-dir")
            .arg(&out_dir)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Checklist_EPI_20250602_Maria_Oliveira.pdf",
            ))
            .stdout(predicate::str::contains("\"mime\": \"application/pdf\""));

        let pdf = std::fs::read(out_dir.join("Checklist_EPI_20250602_Maria_Oliveira.pdf")).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn explicit_output_path() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "epi.json", COMPLETE_EPI);
        let output = dir.path().join("relatorio.pdf");

        sc_core()
            .args(["render", "-f", "summary"])
            .arg(&path)
            .arg("--output")
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("relatorio.pdf"));
        assert!(output.is_file());
    }

    #[test]
    fn stdout_receives_pdf_bytes() {
        let output = sc_core()
            .args(["render", "-", "--stdout"])
            .write_stdin(COMPLETE_EPI)
            .output()
            .unwrap();
        assert!(output.status.success());
        assert!(output.stdout.starts_with(b"%PDF-"));
    }

    #[test]
    fn incomplete_submission_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "epc.json", NO_RESPONSIBLE_EPC);
        let out_dir = dir.path().join("out");

        sc_core()
            .arg("render")
            .arg(&path)
            .arg("--out-dir")
            .arg(&out_dir)
            .assert()
            .code(11);
        assert!(!out_dir.exists());
    }

    #[test]
    fn missing_branding_is_not_an_error() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "epi.json", COMPLETE_EPI);

        sc_core()
            .arg("render")
            .arg(&path)
            .arg("--out-dir")
            .arg(dir.path())
            .env("SC_BRANDING", dir.path().join("missing.png"))
            .assert()
            .success();
    }

    #[test]
    fn invalid_config_exits_13() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "epi.json", COMPLETE_EPI);
        let config = write(dir.path(), "report.json", r##"{"theme": {"accent": "F7931"}}"##);

        sc_core()
            .arg("render")
            .arg(&path)
            .arg("--config")
            .arg(&config)
            .arg("--out-dir")
            .arg(dir.path())
            .assert()
            .code(13);
    }

    #[test]
    fn output_conflicts_with_stdout() {
        sc_core()
            .args(["render", "x.json", "--output", "a.pdf", "--stdout"])
            .assert()
            .code(10);
    }
}
