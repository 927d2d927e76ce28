//! Task lifecycle status and its legal-transition table.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visit task lifecycle status.
///
/// Rescheduling is not a resting status: a rescheduled task re-enters
/// [`Scheduled`](Self::Scheduled) and the prior date survives as an audit
/// record on the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Visit is on the calendar but has not started.
    Scheduled,
    /// Clinician has started the visit.
    InProgress,
    /// Visit is documented and awaiting QA review.
    CompletedPendingQa,
    /// QA has approved the completed visit.
    QaApproved,
    /// Visit was cancelled with a reason.
    Cancelled,
    /// Scheduled date passed with no start and no cancellation.
    Missed,
    /// Patient was not present at the scheduled visit.
    NoShow,
}

/// Legal status transitions, keyed by current status.
///
/// `Scheduled -> Scheduled` covers rescheduling, which re-enters the
/// scheduling status on the same aggregate. Terminal statuses own empty
/// rows so the table enumerates every status exactly once.
pub const LEGAL_TRANSITIONS: &[(TaskStatus, &[TaskStatus])] = &[
    (
        TaskStatus::Scheduled,
        &[
            TaskStatus::Scheduled,
            TaskStatus::InProgress,
            TaskStatus::CompletedPendingQa,
            TaskStatus::Cancelled,
            TaskStatus::Missed,
            TaskStatus::NoShow,
        ],
    ),
    (
        TaskStatus::InProgress,
        &[
            TaskStatus::Scheduled,
            TaskStatus::CompletedPendingQa,
            TaskStatus::Cancelled,
        ],
    ),
    (
        TaskStatus::CompletedPendingQa,
        &[TaskStatus::Scheduled, TaskStatus::QaApproved],
    ),
    (TaskStatus::QaApproved, &[]),
    (TaskStatus::Cancelled, &[]),
    (TaskStatus::Missed, &[]),
    (TaskStatus::NoShow, &[]),
];

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::CompletedPendingQa => "completed_pending_qa",
            Self::QaApproved => "qa_approved",
            Self::Cancelled => "cancelled",
            Self::Missed => "missed",
            Self::NoShow => "no_show",
        }
    }

    /// Returns whether no further transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::QaApproved | Self::Cancelled | Self::Missed | Self::NoShow
        )
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

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed_pending_qa" => Ok(Self::CompletedPendingQa),
            "qa_approved" => Ok(Self::QaApproved),
            "cancelled" => Ok(Self::Cancelled),
            "missed" => Ok(Self::Missed),
            "no_show" => Ok(Self::NoShow),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
