//! Inspection status codes.
//!
//! Each checklist kind has its own fixed set of four codes. The printed code
//! is not unique across kinds (`C` is "Não Liberar" on the EPC sheet and
//! "Conforme" on the EPI sheet), so textual codes are always resolved against
//! a [`ChecklistKind`].

use serde::{Deserialize, Serialize};

use crate::catalog::ChecklistKind;

/// Outcome assigned to a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    /// EPC `A`: equipment in good condition.
    Good,
    /// EPC `B`: usable, but follow-up is required.
    RequestAction,
    /// EPC `C`: equipment must not be released for use.
    DoNotRelease,
    /// EPI `C`: item present and conforming.
    Conforming,
    /// EPI `NC`: item present but not conforming.
    NonConforming,
    /// EPI `NR`: item was never received by the employee.
    NotReceived,
    /// `N/A` on either sheet.
    NotApplicable,
}

const EPC_STATUSES: [StatusCode; 4] = [
    StatusCode::Good,
    StatusCode::RequestAction,
    StatusCode::DoNotRelease,
    StatusCode::NotApplicable,
];

const EPI_STATUSES: [StatusCode; 4] = [
    StatusCode::Conforming,
    StatusCode::NonConforming,
    StatusCode::NotReceived,
    StatusCode::NotApplicable,
];

impl StatusCode {
    /// Code printed in table headers and accepted in submissions.
    pub fn code(&self) -> &'static str {
        match self {
            StatusCode::Good => "A",
            StatusCode::RequestAction => "B",
            StatusCode::DoNotRelease => "C",
            StatusCode::Conforming => "C",
            StatusCode::NonConforming => "NC",
            StatusCode::NotReceived => "NR",
            StatusCode::NotApplicable => "N/A",
        }
    }

    /// Legend label for the code.
    pub fn label(&self) -> &'static str {
        match self {
            StatusCode::Good => "Bom",
            StatusCode::RequestAction => "Solicitar Providências",
            StatusCode::DoNotRelease => "Não Liberar",
            StatusCode::Conforming => "Conforme",
            StatusCode::NonConforming => "Não Conforme",
            StatusCode::NotReceived => "Não Recebeu",
            StatusCode::NotApplicable => "Não se Aplica",
        }
    }

    /// Whether this status belongs to the given kind's status set.
    pub fn is_valid_for(&self, kind: ChecklistKind) -> bool {
        kind.statuses().contains(self)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ChecklistKind {
    /// Valid status codes for this kind, in table column order.
    pub fn statuses(&self) -> &'static [StatusCode] {
        match self {
            ChecklistKind::Epc => &EPC_STATUSES,
            ChecklistKind::Epi => &EPI_STATUSES,
        }
    }

    /// Resolve a textual code (`"A"`, `"nc"`, `"N/A"`) against this kind.
    ///
    /// Matching ignores surrounding whitespace and ASCII case. Returns `None`
    /// for codes outside the kind's set.
    pub fn parse_status(&self, code: &str) -> Option<StatusCode> {
        let code = code.trim();
        self.statuses()
            .iter()
            .copied()
            .find(|status| status.code().eq_ignore_ascii_case(code))
    }

    /// Column index of a status in this kind's tables (0 = first status column).
    pub fn status_column(&self, status: StatusCode) -> Option<usize> {
        self.statuses().iter().position(|s| *s == status)
    }

    /// Legend line as printed under the metadata table.
    pub fn legend(&self) -> String {
        let entries: Vec<String> = self
            .statuses()
            .iter()
            .map(|s| format!("{} = {}", s.code(), s.label()))
            .collect();
        format!("Legenda: {}", entries.join(" | "))
    }
}
