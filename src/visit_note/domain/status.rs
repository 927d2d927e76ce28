//! Visit note lifecycle status and its legal-transition table.

use super::ParseVisitNoteStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visit note lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitNoteStatus {
    /// Being drafted by the visiting clinician.
    Draft,
    /// Submitted and awaiting QA review.
    Submitted,
    /// QA approved; immutable through this core.
    Approved,
    /// QA returned the note for correction; editable again.
    Returned,
}

/// Legal status transitions, keyed by current status.
///
/// `Returned -> Submitted` lets a corrected note resubmit directly, since
/// a returned note is already editable; `Returned -> Draft` remains for
/// clients that prefer the explicit hop.
pub const LEGAL_TRANSITIONS: &[(VisitNoteStatus, &[VisitNoteStatus])] = &[
    (VisitNoteStatus::Draft, &[VisitNoteStatus::Submitted]),
    (
        VisitNoteStatus::Submitted,
        &[VisitNoteStatus::Approved, VisitNoteStatus::Returned],
    ),
    (
        VisitNoteStatus::Returned,
        &[VisitNoteStatus::Draft, VisitNoteStatus::Submitted],
    ),
    (VisitNoteStatus::Approved, &[]),
];

impl VisitNoteStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Returned => "returned",
        }
    }

    /// Returns whether no further transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Returns whether the note may be edited in this status.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Returned)
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

impl fmt::Display for VisitNoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for VisitNoteStatus {
    type Error = ParseVisitNoteStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "returned" => Ok(Self::Returned),
            _ => Err(ParseVisitNoteStatusError(value.to_owned())),
        }
    }
}
