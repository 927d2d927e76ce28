//! Visit note aggregate root and related lifecycle types.

use super::{VisitNoteDomainError, VisitNoteId, VisitNoteStatus};
use crate::review::domain::{
    EpisodeId, PatientId, Reviewable, ReviewDecision, ReviewError, ReviewMeta, ReviewRecord,
    UserId,
};
use crate::task::domain::TaskId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discipline of the visit being documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitType {
    /// Skilled nursing visit.
    SkilledNursing,
    /// Home health aide visit.
    HomeHealthAide,
    /// Physical therapy visit.
    PhysicalTherapy,
    /// Occupational therapy visit.
    OccupationalTherapy,
    /// Speech therapy visit.
    SpeechTherapy,
    /// Medical social work visit.
    MedicalSocialWork,
}

/// Required fields for opening a new visit note draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisitNote {
    /// Visit task being documented, when already known.
    pub task_id: Option<TaskId>,
    /// Patient who received the visit.
    pub patient_id: PatientId,
    /// Episode of care the visit belongs to.
    pub episode_id: EpisodeId,
    /// Discipline of the visit.
    pub visit_type: VisitType,
}

/// Visit note aggregate root.
///
/// Documents one visit, one-to-one with its task. The narrative payload is
/// opaque to the workflow core. A note is editable only while in
/// [`VisitNoteStatus::Draft`] or [`VisitNoteStatus::Returned`];
/// [`VisitNoteStatus::Approved`] is terminal and immutable here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitNote {
    id: VisitNoteId,
    task_id: Option<TaskId>,
    patient_id: PatientId,
    episode_id: EpisodeId,
    visit_type: VisitType,
    visit_date: Option<NaiveDate>,
    visit_start_time: Option<NaiveTime>,
    visit_end_time: Option<NaiveTime>,
    narrative: Value,
    status: VisitNoteStatus,
    review: ReviewMeta,
    review_history: Vec<ReviewRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VisitNote {
    /// Opens a new visit note draft.
    #[must_use]
    pub fn open(data: NewVisitNote, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: VisitNoteId::new(),
            task_id: data.task_id,
            patient_id: data.patient_id,
            episode_id: data.episode_id,
            visit_type: data.visit_type,
            visit_date: None,
            visit_start_time: None,
            visit_end_time: None,
            narrative: Value::Null,
            status: VisitNoteStatus::Draft,
            review: ReviewMeta::new(),
            review_history: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the note identifier.
    #[must_use]
    pub const fn id(&self) -> VisitNoteId {
        self.id
    }

    /// Returns the linked visit task, when linked.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the patient who received the visit.
    #[must_use]
    pub const fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    /// Returns the episode of care.
    #[must_use]
    pub const fn episode_id(&self) -> EpisodeId {
        self.episode_id
    }

    /// Returns the visit discipline.
    #[must_use]
    pub const fn visit_type(&self) -> VisitType {
        self.visit_type
    }

    /// Returns the visit calendar date, when recorded.
    #[must_use]
    pub const fn visit_date(&self) -> Option<NaiveDate> {
        self.visit_date
    }

    /// Returns the visit start time, when recorded.
    #[must_use]
    pub const fn visit_start_time(&self) -> Option<NaiveTime> {
        self.visit_start_time
    }

    /// Returns the visit end time, when recorded.
    #[must_use]
    pub const fn visit_end_time(&self) -> Option<NaiveTime> {
        self.visit_end_time
    }

    /// Returns the visit duration in minutes when both times are
    /// recorded. Derived, never stored.
    #[must_use]
    pub fn visit_duration_minutes(&self) -> Option<i64> {
        match (self.visit_start_time, self.visit_end_time) {
            (Some(start), Some(end)) => Some((end - start).num_minutes()),
            _ => None,
        }
    }

    /// Returns the opaque clinical narrative payload.
    #[must_use]
    pub const fn narrative(&self) -> &Value {
        &self.narrative
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> VisitNoteStatus {
        self.status
    }

    /// Returns every review decision made over the note's life, oldest
    /// first. Never truncated by resubmission.
    #[must_use]
    pub fn review_history(&self) -> &[ReviewRecord] {
        &self.review_history
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

    /// Returns whether the note may currently be edited.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    fn ensure_editable(&self) -> Result<(), VisitNoteDomainError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(VisitNoteDomainError::NotEditable {
                id: self.id,
                status: self.status,
            })
        }
    }

    /// Links the note to its visit task. The link is one-to-one and
    /// immutable once set.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteDomainError::TaskAlreadyLinked`] when a task is
    /// already linked, or [`VisitNoteDomainError::NotEditable`] outside an
    /// editable status.
    pub fn link_task(
        &mut self,
        task_id: TaskId,
        clock: &impl Clock,
    ) -> Result<(), VisitNoteDomainError> {
        self.ensure_editable()?;
        if self.task_id.is_some() {
            return Err(VisitNoteDomainError::TaskAlreadyLinked(self.id));
        }
        self.task_id = Some(task_id);
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Records the visit date and optional time window.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteDomainError::NotEditable`] outside an editable
    /// status.
    pub fn set_visit_window(
        &mut self,
        date: NaiveDate,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        clock: &impl Clock,
    ) -> Result<(), VisitNoteDomainError> {
        self.ensure_editable()?;
        self.visit_date = Some(date);
        self.visit_start_time = start;
        self.visit_end_time = end;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Replaces the clinical narrative payload.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteDomainError::NotEditable`] outside an editable
    /// status.
    pub fn update_narrative(
        &mut self,
        narrative: Value,
        clock: &impl Clock,
    ) -> Result<(), VisitNoteDomainError> {
        self.ensure_editable()?;
        self.narrative = narrative;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Submits the note for QA review. The minimum documentation contract
    /// requires a linked task and a visit date. Resubmission directly from
    /// [`VisitNoteStatus::Returned`] is legal.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteDomainError::MissingTaskLink`] or
    /// [`VisitNoteDomainError::MissingVisitDate`] when the contract is
    /// unmet, or [`VisitNoteDomainError::InvalidTransition`] from a
    /// non-editable status.
    pub fn submit(&mut self, by: UserId, clock: &impl Clock) -> Result<(), VisitNoteDomainError> {
        if !self.status.can_transition_to(VisitNoteStatus::Submitted) {
            return Err(self.invalid_transition(VisitNoteStatus::Submitted));
        }
        if self.task_id.is_none() {
            return Err(VisitNoteDomainError::MissingTaskLink(self.id));
        }
        if self.visit_date.is_none() {
            return Err(VisitNoteDomainError::MissingVisitDate(self.id));
        }
        let now = clock.utc();
        self.review.record_submission(by, now);
        self.status = VisitNoteStatus::Submitted;
        self.updated_at = now;
        Ok(())
    }

    /// Approves the submitted note, ending its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteDomainError::InvalidTransition`] unless the note
    /// is awaiting review, or [`VisitNoteDomainError::Review`] when the
    /// audit trail rejects the decision.
    pub fn approve(
        &mut self,
        by: UserId,
        comments: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), VisitNoteDomainError> {
        if !self.status.can_transition_to(VisitNoteStatus::Approved) {
            return Err(self.invalid_transition(VisitNoteStatus::Approved));
        }
        let now = clock.utc();
        self.review.ensure_reviewable(now)?;
        self.review.record_review(by, now, comments.clone());
        self.review_history.push(ReviewRecord {
            reviewed_by: by,
            reviewed_at: now,
            decision: ReviewDecision::Approve,
            comments,
        });
        self.status = VisitNoteStatus::Approved;
        self.updated_at = now;
        Ok(())
    }

    /// Returns the submitted note for correction with mandatory comments.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::EmptyComments`] when comments are blank, or
    /// [`VisitNoteDomainError::InvalidTransition`] unless the note is
    /// awaiting review.
    pub fn return_for_correction(
        &mut self,
        by: UserId,
        comments: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), VisitNoteDomainError> {
        let comments = comments.into();
        if comments.trim().is_empty() {
            return Err(ReviewError::EmptyComments.into());
        }
        if !self.status.can_transition_to(VisitNoteStatus::Returned) {
            return Err(self.invalid_transition(VisitNoteStatus::Returned));
        }
        let now = clock.utc();
        self.review.ensure_reviewable(now)?;
        self.review.record_review(by, now, Some(comments.clone()));
        self.review_history.push(ReviewRecord {
            reviewed_by: by,
            reviewed_at: now,
            decision: ReviewDecision::Return,
            comments: Some(comments),
        });
        self.status = VisitNoteStatus::Returned;
        self.updated_at = now;
        Ok(())
    }

    /// Moves a returned note back to draft, clearing the live reviewer
    /// fields. The review history is retained.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteDomainError::InvalidTransition`] unless the note
    /// is in [`VisitNoteStatus::Returned`].
    pub fn back_to_draft(&mut self, clock: &impl Clock) -> Result<(), VisitNoteDomainError> {
        if !self.status.can_transition_to(VisitNoteStatus::Draft) {
            return Err(self.invalid_transition(VisitNoteStatus::Draft));
        }
        self.review.clear_review();
        self.status = VisitNoteStatus::Draft;
        self.updated_at = clock.utc();
        Ok(())
    }

    const fn invalid_transition(&self, to: VisitNoteStatus) -> VisitNoteDomainError {
        VisitNoteDomainError::InvalidTransition {
            id: self.id,
            from: self.status,
            to,
        }
    }
}

impl Reviewable for VisitNote {
    fn review_meta(&self) -> &ReviewMeta {
        &self.review
    }

    fn is_pending_review(&self) -> bool {
        self.status == VisitNoteStatus::Submitted
    }
}
