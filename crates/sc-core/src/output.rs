//! Command payload formatting for JSON, Markdown and summary output.

use std::io::Read;
use std::path::Path;

use sc_common::catalog::CATALOG_VERSION;
use sc_common::{
    Catalog, ChecklistKind, Error, Result, StatusTally, Submission, ValidationProblem,
    SCHEMA_VERSION,
};
use serde::Serialize;

/// Read a submission from a file, or from stdin when `source` is `-`.
pub fn read_submission(source: &Path) -> Result<Submission> {
    let json = if source == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)?
    };
    Submission::from_json(&json)
}

/// One status code with its legend label.
#[derive(Debug, Clone, Serialize)]
pub struct StatusEntry {
    pub code: &'static str,
    pub label: &'static str,
}

/// One category with its items.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntry {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

/// Catalog listing for the `catalog` command.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub schema_version: &'static str,
    pub catalog_version: &'static str,
    pub kind: ChecklistKind,
    pub title: &'static str,
    pub statuses: Vec<StatusEntry>,
    pub categories: Vec<CategoryEntry>,
    pub item_count: usize,
}

impl CatalogView {
    pub fn new(kind: ChecklistKind) -> Self {
        let catalog = Catalog::for_kind(kind);
        CatalogView {
            schema_version: SCHEMA_VERSION,
            catalog_version: CATALOG_VERSION,
            kind,
            title: kind.title(),
            statuses: kind
                .statuses()
                .iter()
                .map(|s| StatusEntry {
                    code: s.code(),
                    label: s.label(),
                })
                .collect(),
            categories: catalog
                .categories
                .iter()
                .map(|c| CategoryEntry {
                    name: c.name,
                    items: c.items,
                })
                .collect(),
            item_count: catalog.item_count(),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n{}\n", self.title, self.kind.legend());
        for category in &self.categories {
            out.push_str(&format!("\n## {}\n\n", category.name));
            for item in category.items {
                out.push_str(&format!("- {}\n", item));
            }
        }
        out.push_str(&format!("\nTotal: {} itens\n", self.item_count));
        out
    }

    pub fn to_summary(&self) -> String {
        format!(
            "{}: {} categories, {} items, statuses {}",
            self.kind.short_label(),
            self.categories.len(),
            self.item_count,
            self.statuses
                .iter()
                .map(|s| s.code)
                .collect::<Vec<_>>()
                .join("/")
        )
    }
}

/// Result of the `validate` command.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub schema_version: &'static str,
    pub kind: ChecklistKind,
    pub valid: bool,
    pub answered: usize,
    pub total: usize,
    pub problems: Vec<ValidationProblem>,
    pub messages: Vec<&'static str>,
}

impl ValidationReport {
    pub fn new(kind: ChecklistKind, tally: &StatusTally, problems: Vec<ValidationProblem>) -> Self {
        ValidationReport {
            schema_version: SCHEMA_VERSION,
            kind,
            valid: problems.is_empty(),
            answered: tally.answered,
            total: tally.total,
            messages: problems.iter().map(|p| p.message()).collect(),
            problems,
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = format!(
            "# Validação {}\n\n{} de {} itens respondidos\n\n",
            self.kind.short_label(),
            self.answered,
            self.total
        );
        if self.valid {
            out.push_str("✓ Checklist completo\n");
        } else {
            for message in &self.messages {
                out.push_str(&format!("✗ {}\n", message));
            }
        }
        out
    }

    pub fn to_summary(&self) -> String {
        if self.valid {
            format!("{}: ok ({}/{})", self.kind.short_label(), self.answered, self.total)
        } else {
            format!(
                "{}: invalid ({})",
                self.kind.short_label(),
                self.messages.join("; ")
            )
        }
    }
}

/// Markdown table of a tally.
pub fn tally_markdown(tally: &StatusTally) -> String {
    let mut out = format!(
        "# Estatísticas {}\n\n| Código | Status | Itens |\n|---|---|---|\n",
        tally.kind.short_label()
    );
    for count in &tally.counts {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            count.code, count.label, count.count
        ));
    }
    out.push_str(&format!(
        "\n{} respondidos, {} sem resposta, {} no total\n",
        tally.answered, tally.unanswered, tally.total
    ));
    out
}

/// One-line tally.
pub fn tally_summary(tally: &StatusTally) -> String {
    let counts: Vec<String> = tally
        .counts
        .iter()
        .map(|c| format!("{}={}", c.code, c.count))
        .collect();
    format!(
        "{}: {} ({}/{} answered)",
        tally.kind.short_label(),
        counts.join(" "),
        tally.answered,
        tally.total
    )
}

/// Serialize a payload as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Error::from)
}
