//! OASIS assessment aggregate root and related lifecycle types.

use super::{AssessmentDomainError, AssessmentId, AssessmentStatus};
use crate::review::domain::{
    EpisodeId, PatientId, Reviewable, ReviewDecision, ReviewMeta, ReviewRecord, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Care milestone an OASIS assessment is collected at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    /// Initial admission to home health.
    StartOfCare,
    /// Recertification for a further episode.
    Recertification,
    /// Resumption of care after an inpatient stay.
    ResumptionOfCare,
    /// Transfer to an inpatient facility.
    TransferToInpatient,
    /// Follow-up during an episode.
    FollowUp,
    /// Discharge from the agency.
    Discharge,
}

/// Validated completion percentage of the assessment instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionPercentage(u8);

impl CompletionPercentage {
    /// Creates a validated completion percentage.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentDomainError::InvalidCompletionPercentage`] when
    /// the value exceeds 100.
    pub const fn new(value: u8) -> Result<Self, AssessmentDomainError> {
        if value > 100 {
            return Err(AssessmentDomainError::InvalidCompletionPercentage(value));
        }
        Ok(Self(value))
    }

    /// A fully complete instrument.
    pub const COMPLETE: Self = Self(100);

    /// An untouched instrument.
    pub const EMPTY: Self = Self(0);

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns whether every instrument item is answered.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 == 100
    }
}

/// Required fields for opening a new assessment draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssessment {
    /// Patient being assessed.
    pub patient_id: PatientId,
    /// Episode of care the assessment belongs to.
    pub episode_id: EpisodeId,
    /// Care milestone being assessed.
    pub assessment_type: AssessmentType,
    /// Calendar date of the assessment.
    pub assessment_date: NaiveDate,
}

/// OASIS assessment aggregate root.
///
/// The clinical instrument payload is opaque to the workflow core; only
/// the lifecycle, completion percentage, and audit fields are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OasisAssessment {
    id: AssessmentId,
    patient_id: PatientId,
    episode_id: EpisodeId,
    assessment_type: AssessmentType,
    assessment_date: NaiveDate,
    completion: CompletionPercentage,
    last_auto_saved: Option<DateTime<Utc>>,
    clinical_data: Value,
    status: AssessmentStatus,
    review: ReviewMeta,
    review_history: Vec<ReviewRecord>,
    locked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OasisAssessment {
    /// Opens a new assessment draft with an empty instrument.
    #[must_use]
    pub fn open(data: NewAssessment, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AssessmentId::new(),
            patient_id: data.patient_id,
            episode_id: data.episode_id,
            assessment_type: data.assessment_type,
            assessment_date: data.assessment_date,
            completion: CompletionPercentage::EMPTY,
            last_auto_saved: None,
            clinical_data: Value::Null,
            status: AssessmentStatus::Draft,
            review: ReviewMeta::new(),
            review_history: Vec::new(),
            locked_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the assessment identifier.
    #[must_use]
    pub const fn id(&self) -> AssessmentId {
        self.id
    }

    /// Returns the patient being assessed.
    #[must_use]
    pub const fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    /// Returns the episode of care.
    #[must_use]
    pub const fn episode_id(&self) -> EpisodeId {
        self.episode_id
    }

    /// Returns the care milestone.
    #[must_use]
    pub const fn assessment_type(&self) -> AssessmentType {
        self.assessment_type
    }

    /// Returns the assessment calendar date.
    #[must_use]
    pub const fn assessment_date(&self) -> NaiveDate {
        self.assessment_date
    }

    /// Returns the completion percentage of the instrument.
    #[must_use]
    pub const fn completion(&self) -> CompletionPercentage {
        self.completion
    }

    /// Returns the last autosave instant, when any.
    #[must_use]
    pub const fn last_auto_saved(&self) -> Option<DateTime<Utc>> {
        self.last_auto_saved
    }

    /// Returns the opaque clinical instrument payload.
    #[must_use]
    pub const fn clinical_data(&self) -> &Value {
        &self.clinical_data
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AssessmentStatus {
        self.status
    }

    /// Returns every review decision made over the assessment's life,
    /// oldest first. Never truncated by resubmission.
    #[must_use]
    pub fn review_history(&self) -> &[ReviewRecord] {
        &self.review_history
    }

    /// Returns when the assessment was locked, once locked.
    #[must_use]
    pub const fn locked_at(&self) -> Option<DateTime<Utc>> {
        self.locked_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Autosaves drafted instrument data.
    ///
    /// Rejecting non-draft autosaves (rather than silently ignoring them)
    /// surfaces stale clients still writing after submission.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentDomainError::InvalidTransition`] unless the
    /// assessment is in [`AssessmentStatus::Draft`].
    pub fn auto_save(
        &mut self,
        clinical_data: Value,
        completion: CompletionPercentage,
        clock: &impl Clock,
    ) -> Result<(), AssessmentDomainError> {
        if self.status != AssessmentStatus::Draft {
            return Err(self.invalid_transition(AssessmentStatus::Draft));
        }
        let now = clock.utc();
        self.clinical_data = clinical_data;
        self.completion = completion;
        self.last_auto_saved = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Submits the assessment for QA review. Partial submissions are
    /// blocked: the instrument must be 100% complete.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentDomainError::IncompleteSubmission`] below full
    /// completion, or [`AssessmentDomainError::InvalidTransition`] unless
    /// the assessment is in [`AssessmentStatus::Draft`].
    pub fn submit(&mut self, by: UserId, clock: &impl Clock) -> Result<(), AssessmentDomainError> {
        if !self.status.can_transition_to(AssessmentStatus::Submitted) {
            return Err(self.invalid_transition(AssessmentStatus::Submitted));
        }
        if !self.completion.is_complete() {
            return Err(AssessmentDomainError::IncompleteSubmission {
                id: self.id,
                completion: self.completion.value(),
            });
        }
        let now = clock.utc();
        self.review.record_submission(by, now);
        self.status = AssessmentStatus::Submitted;
        self.updated_at = now;
        Ok(())
    }

    /// Records a QA decision: approval moves the assessment to
    /// [`AssessmentStatus::Approved`]; a return moves it to
    /// [`AssessmentStatus::Rejected`] and requires comments.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentDomainError::InvalidTransition`] unless the
    /// assessment is awaiting review, or [`AssessmentDomainError::Review`]
    /// when comments are missing on a return or the audit trail rejects
    /// the decision.
    pub fn review(
        &mut self,
        decision: ReviewDecision,
        by: UserId,
        comments: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), AssessmentDomainError> {
        let target = match decision {
            ReviewDecision::Approve => AssessmentStatus::Approved,
            ReviewDecision::Return => AssessmentStatus::Rejected,
        };
        if !self.status.can_transition_to(target) {
            return Err(self.invalid_transition(target));
        }
        if decision == ReviewDecision::Return
            && comments.as_deref().is_none_or(|c| c.trim().is_empty())
        {
            return Err(crate::review::domain::ReviewError::EmptyComments.into());
        }
        let now = clock.utc();
        self.review.ensure_reviewable(now)?;
        self.review.record_review(by, now, comments.clone());
        self.review_history.push(ReviewRecord {
            reviewed_by: by,
            reviewed_at: now,
            decision,
            comments,
        });
        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    /// Reopens a rejected assessment for correction, clearing the live
    /// reviewer fields. The review history is retained.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentDomainError::InvalidTransition`] unless the
    /// assessment is in [`AssessmentStatus::Rejected`].
    pub fn back_to_draft(&mut self, clock: &impl Clock) -> Result<(), AssessmentDomainError> {
        if !self.status.can_transition_to(AssessmentStatus::Draft) {
            return Err(self.invalid_transition(AssessmentStatus::Draft));
        }
        self.review.clear_review();
        self.status = AssessmentStatus::Draft;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Locks an approved assessment against all further change.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentDomainError::InvalidTransition`] unless the
    /// assessment is in [`AssessmentStatus::Approved`].
    pub fn lock(&mut self, clock: &impl Clock) -> Result<(), AssessmentDomainError> {
        if !self.status.can_transition_to(AssessmentStatus::Locked) {
            return Err(self.invalid_transition(AssessmentStatus::Locked));
        }
        let now = clock.utc();
        self.locked_at = Some(now);
        self.status = AssessmentStatus::Locked;
        self.updated_at = now;
        Ok(())
    }

    const fn invalid_transition(&self, to: AssessmentStatus) -> AssessmentDomainError {
        AssessmentDomainError::InvalidTransition {
            id: self.id,
            from: self.status,
            to,
        }
    }
}

impl Reviewable for OasisAssessment {
    fn review_meta(&self) -> &ReviewMeta {
        &self.review
    }

    fn is_pending_review(&self) -> bool {
        self.status == AssessmentStatus::Submitted
    }
}
