//! Assessment lifecycle status and its legal-transition table.

use super::ParseAssessmentStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// OASIS assessment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// Being drafted and autosaved by the clinician.
    Draft,
    /// Submitted and awaiting QA review.
    Submitted,
    /// QA approved; eligible for locking.
    Approved,
    /// QA rejected; must return to draft before resubmission.
    Rejected,
    /// Locked against all further change.
    Locked,
}

/// Legal status transitions, keyed by current status.
pub const LEGAL_TRANSITIONS: &[(AssessmentStatus, &[AssessmentStatus])] = &[
    (AssessmentStatus::Draft, &[AssessmentStatus::Submitted]),
    (
        AssessmentStatus::Submitted,
        &[AssessmentStatus::Approved, AssessmentStatus::Rejected],
    ),
    (AssessmentStatus::Approved, &[AssessmentStatus::Locked]),
    (AssessmentStatus::Rejected, &[AssessmentStatus::Draft]),
    (AssessmentStatus::Locked, &[]),
];

impl AssessmentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Locked => "locked",
        }
    }

    /// Returns whether no further transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Locked)
    }

    /// Returns whether the transition `self -> to` appears in
    /// [`LEGAL_TRANSITIONS`].
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        LEGAL_TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .is_some_and(|(_, targets)| targets.contains(&to))
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AssessmentStatus {
    type Error = ParseAssessmentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "locked" => Ok(Self::Locked),
            _ => Err(ParseAssessmentStatusError(value.to_owned())),
        }
    }
}
