//! Shared review-audit metadata implemented by every reviewable entity.

use super::{ReviewError, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two decisions a QA reviewer can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// The submitted work is accepted.
    Approve,
    /// The submitted work is sent back for correction.
    Return,
}

impl ReviewDecision {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Return => "return",
        }
    }
}

/// One historical review decision, retained across resubmission loops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Reviewer who made the decision.
    pub reviewed_by: UserId,
    /// Instant of the decision.
    pub reviewed_at: DateTime<Utc>,
    /// Decision reached.
    pub decision: ReviewDecision,
    /// Reviewer comments, mandatory when the decision returns the work.
    pub comments: Option<String>,
}

/// Submission and review audit fields shared by tasks, assessments, and
/// visit notes.
///
/// Submission metadata is written when an entity enters its pending-review
/// status and is overwritten wholesale on resubmission. Reviewer fields are
/// written by [`record_review`](Self::record_review) and cleared when the
/// work re-enters an editable status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewMeta {
    submitted_by: Option<UserId>,
    submitted_at: Option<DateTime<Utc>>,
    reviewed_by: Option<UserId>,
    reviewed_at: Option<DateTime<Utc>>,
    review_comments: Option<String>,
}

impl ReviewMeta {
    /// Creates empty review metadata for a freshly drafted entity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            submitted_by: None,
            submitted_at: None,
            reviewed_by: None,
            reviewed_at: None,
            review_comments: None,
        }
    }

    /// Returns the submitting user, when submitted.
    #[must_use]
    pub const fn submitted_by(&self) -> Option<UserId> {
        self.submitted_by
    }

    /// Returns the submission instant, when submitted.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns the reviewing user, when reviewed.
    #[must_use]
    pub const fn reviewed_by(&self) -> Option<UserId> {
        self.reviewed_by
    }

    /// Returns the review instant, when reviewed.
    #[must_use]
    pub const fn reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.reviewed_at
    }

    /// Returns the reviewer comments, when present.
    #[must_use]
    pub fn review_comments(&self) -> Option<&str> {
        self.review_comments.as_deref()
    }

    /// Returns whether the entity has been submitted at least once since
    /// its last return to an editable status.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// Records a (re)submission, overwriting prior submission metadata and
    /// clearing any stale reviewer fields.
    pub fn record_submission(&mut self, by: UserId, at: DateTime<Utc>) {
        self.submitted_by = Some(by);
        self.submitted_at = Some(at);
        self.reviewed_by = None;
        self.reviewed_at = None;
        self.review_comments = None;
    }

    /// Validates that a review at `at` is legal against the submission
    /// audit trail without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::NotSubmitted`] when the entity was never
    /// submitted, or [`ReviewError::ReviewPrecedesSubmission`] when `at`
    /// falls before the submission instant.
    pub fn ensure_reviewable(&self, at: DateTime<Utc>) -> Result<(), ReviewError> {
        let Some(submitted_at) = self.submitted_at else {
            return Err(ReviewError::NotSubmitted);
        };
        if at < submitted_at {
            return Err(ReviewError::ReviewPrecedesSubmission {
                submitted_at,
                reviewed_at: at,
            });
        }
        Ok(())
    }

    /// Records the reviewer fields. Callers must have validated the review
    /// with [`ensure_reviewable`](Self::ensure_reviewable) first.
    pub fn record_review(&mut self, by: UserId, at: DateTime<Utc>, comments: Option<String>) {
        self.reviewed_by = Some(by);
        self.reviewed_at = Some(at);
        self.review_comments = comments;
    }

    /// Clears live reviewer fields when the work re-enters an editable
    /// status. Submission metadata stays until the next resubmission
    /// overwrites it.
    pub fn clear_review(&mut self) {
        self.reviewed_by = None;
        self.reviewed_at = None;
        self.review_comments = None;
    }
}

/// Capability contract shared by the three reviewable entity kinds.
///
/// There is no common base type: each aggregate owns its own status enum
/// and implements this contract independently, letting the QA coordinator
/// operate generically over tagged variants.
pub trait Reviewable {
    /// Returns the submission/review audit block.
    fn review_meta(&self) -> &ReviewMeta;

    /// Returns whether the entity currently sits in its kind-specific
    /// pending-review status.
    fn is_pending_review(&self) -> bool;
}
