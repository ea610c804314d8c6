//! Answer sets and checklist submissions.
//!
//! A [`Submission`] is what a caller hands in: the kind, the metadata and
//! the raw textual answers (`"A"`, `"NC"`, `""`). Resolving it produces a
//! typed [`AnswerSet`] in which every status is known to be valid for the
//! kind and every item exists in the kind's catalog.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ChecklistKind};
use crate::error::{Error, Result};
use crate::metadata::InspectionMetadata;
use crate::status::StatusCode;
use crate::SCHEMA_VERSION;

/// Mapping from item name to its assigned status. Absent means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, StatusCode>,
}

impl AnswerSet {
    /// Empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a status, returning the previous one.
    pub fn insert(&mut self, item: impl Into<String>, status: StatusCode) -> Option<StatusCode> {
        self.answers.insert(item.into(), status)
    }

    /// Builder form of [`AnswerSet::insert`].
    pub fn with(mut self, item: impl Into<String>, status: StatusCode) -> Self {
        self.insert(item, status);
        self
    }

    /// Clear the status of an item.
    pub fn remove(&mut self, item: &str) -> Option<StatusCode> {
        self.answers.remove(item)
    }

    /// Status assigned to `item`.
    pub fn get(&self, item: &str) -> Option<StatusCode> {
        self.answers.get(item).copied()
    }

    /// Number of answered items.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Whether no item is answered.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterate answers in item-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, StatusCode)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Resolve raw textual answers against a kind.
    ///
    /// Blank or `null` values are treated as unanswered. Unknown items and
    /// codes outside the kind's status set are errors.
    pub fn resolve(kind: ChecklistKind, raw: &BTreeMap<String, Option<String>>) -> Result<Self> {
        let catalog = Catalog::for_kind(kind);
        let mut answers = AnswerSet::new();

        for (item, code) in raw {
            if !catalog.contains(item) {
                return Err(Error::UnknownItem {
                    kind,
                    item: item.clone(),
                });
            }
            let code = match code.as_deref().map(str::trim) {
                None | Some("") => continue,
                Some(code) => code,
            };
            let status = kind.parse_status(code).ok_or_else(|| Error::InvalidStatus {
                kind,
                item: item.clone(),
                code: code.to_string(),
            })?;
            answers.insert(item.clone(), status);
        }

        Ok(answers)
    }

    /// Count answers per status for the given kind.
    pub fn tally(&self, kind: ChecklistKind) -> StatusTally {
        let catalog = Catalog::for_kind(kind);
        let counts = kind
            .statuses()
            .iter()
            .map(|status| StatusCount {
                status: *status,
                code: status.code().to_string(),
                label: status.label().to_string(),
                count: catalog
                    .items()
                    .filter(|(_, item)| self.get(item) == Some(*status))
                    .count(),
            })
            .collect::<Vec<_>>();
        let answered: usize = counts.iter().map(|c| c.count).sum();
        let total = catalog.item_count();

        StatusTally {
            kind,
            counts,
            answered,
            unanswered: total - answered,
            total,
        }
    }
}

impl FromIterator<(String, StatusCode)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, StatusCode)>>(iter: I) -> Self {
        AnswerSet {
            answers: iter.into_iter().collect(),
        }
    }
}

/// Count for one status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    /// Status.
    pub status: StatusCode,
    /// Printed code.
    pub code: String,
    /// Legend label.
    pub label: String,
    /// Number of catalog items with this status.
    pub count: usize,
}

/// Per-status statistics of one checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    /// Kind the tally was computed for.
    pub kind: ChecklistKind,
    /// Counts in status column order.
    pub counts: Vec<StatusCount>,
    /// Items with a status.
    pub answered: usize,
    /// Items without a status.
    pub unanswered: usize,
    /// Catalog size.
    pub total: usize,
}

impl StatusTally {
    /// Count for a single status (0 if it is not part of this kind).
    pub fn count(&self, status: StatusCode) -> usize {
        self.counts
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

/// One filled checklist as exchanged with callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Which checklist.
    pub kind: ChecklistKind,
    /// Header fields.
    #[serde(default)]
    pub metadata: InspectionMetadata,
    /// Raw answers by item name.
    #[serde(default)]
    pub answers: BTreeMap<String, Option<String>>,
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl Submission {
    /// Blank submission: every catalog item present and unanswered.
    pub fn blank(kind: ChecklistKind, date: NaiveDate) -> Self {
        let answers = Catalog::for_kind(kind)
            .items()
            .map(|(_, item)| (item.to_string(), None))
            .collect();
        Submission {
            schema_version: default_schema_version(),
            kind,
            metadata: InspectionMetadata::new(date),
            answers,
        }
    }

    /// Resolve the raw answers into a typed answer set.
    pub fn answer_set(&self) -> Result<AnswerSet> {
        AnswerSet::resolve(self.kind, &self.answers)
    }

    /// Parse a submission from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
