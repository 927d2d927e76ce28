//! Visit task aggregate root and related lifecycle types.

use super::{schedule, TaskDomainError, TaskId, TaskStatus};
use crate::review::domain::{EpisodeId, PatientId, Reviewable, ReviewMeta, UserId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Kind of clinical or administrative work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
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
    /// OASIS start-of-care assessment visit.
    OasisStartOfCare,
    /// OASIS recertification assessment visit.
    OasisRecertification,
    /// OASIS discharge assessment visit.
    OasisDischarge,
}

impl TaskType {
    /// Returns whether the task collects an OASIS assessment, and so
    /// correlates with an assessment record at the coordinator layer.
    #[must_use]
    pub const fn is_oasis(self) -> bool {
        matches!(
            self,
            Self::OasisStartOfCare | Self::OasisRecertification | Self::OasisDischarge
        )
    }
}

/// Scheduling priority of a visit task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// May slip without clinical impact.
    Low,
    /// Standard visit priority.
    Routine,
    /// Should be worked ahead of routine visits.
    High,
}

/// Audit record of one reschedule, retained on the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleRecord {
    /// Date the task was scheduled for before the reschedule.
    pub previous_date: NaiveDate,
    /// Date the task moved to.
    pub new_date: NaiveDate,
    /// Reason given for the move.
    pub reason: String,
    /// Actor who moved the task.
    pub rescheduled_by: UserId,
    /// Instant of the move.
    pub rescheduled_at: DateTime<Utc>,
}

/// Required fields for placing a new task on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Patient the visit serves.
    pub patient_id: PatientId,
    /// Episode of care the visit belongs to.
    pub episode_id: EpisodeId,
    /// Clinician assigned to perform the visit.
    pub assigned_to: UserId,
    /// Kind of work to perform.
    pub task_type: TaskType,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Whether the visit is clinically urgent.
    pub is_urgent: bool,
    /// Calendar date of the visit.
    pub scheduled_date: NaiveDate,
    /// Optional start of the scheduled window.
    pub scheduled_start_time: Option<NaiveTime>,
    /// Optional end of the scheduled window.
    pub scheduled_end_time: Option<NaiveTime>,
    /// Optional visit length estimate in minutes.
    pub estimated_duration_minutes: Option<u32>,
    /// Whether the visit is billable.
    pub is_billable: bool,
    /// Billing code, when billable.
    pub billing_code: Option<String>,
}

/// Visit task aggregate root.
///
/// All mutation goes through the transition methods below; each validates
/// permission-independent legality against [`TaskStatus::can_transition_to`]
/// and its own field requirements before writing anything, so a rejected
/// call never leaves a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    patient_id: PatientId,
    episode_id: EpisodeId,
    assigned_to: UserId,
    task_type: TaskType,
    priority: TaskPriority,
    is_urgent: bool,
    scheduled_date: NaiveDate,
    scheduled_start_time: Option<NaiveTime>,
    scheduled_end_time: Option<NaiveTime>,
    estimated_duration_minutes: Option<u32>,
    actual_start_time: Option<DateTime<Utc>>,
    actual_end_time: Option<DateTime<Utc>>,
    actual_duration_minutes: Option<i64>,
    completion_notes: Option<String>,
    completed_by: Option<UserId>,
    completed_at: Option<DateTime<Utc>>,
    cancellation_reason: Option<String>,
    cancelled_by: Option<UserId>,
    cancelled_at: Option<DateTime<Utc>>,
    is_billable: bool,
    billing_code: Option<String>,
    billed: bool,
    status: TaskStatus,
    review: ReviewMeta,
    reschedules: Vec<RescheduleRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Places a new task on the calendar in [`TaskStatus::Scheduled`].
    #[must_use]
    pub fn schedule(data: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            patient_id: data.patient_id,
            episode_id: data.episode_id,
            assigned_to: data.assigned_to,
            task_type: data.task_type,
            priority: data.priority,
            is_urgent: data.is_urgent,
            scheduled_date: data.scheduled_date,
            scheduled_start_time: data.scheduled_start_time,
            scheduled_end_time: data.scheduled_end_time,
            estimated_duration_minutes: data.estimated_duration_minutes,
            actual_start_time: None,
            actual_end_time: None,
            actual_duration_minutes: None,
            completion_notes: None,
            completed_by: None,
            completed_at: None,
            cancellation_reason: None,
            cancelled_by: None,
            cancelled_at: None,
            is_billable: data.is_billable,
            billing_code: data.billing_code,
            billed: false,
            status: TaskStatus::Scheduled,
            review: ReviewMeta::new(),
            reschedules: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the patient the visit serves.
    #[must_use]
    pub const fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    /// Returns the episode of care.
    #[must_use]
    pub const fn episode_id(&self) -> EpisodeId {
        self.episode_id
    }

    /// Returns the assigned clinician.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    /// Returns the kind of work.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the scheduling priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns whether the visit is clinically urgent.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        self.is_urgent
    }

    /// Returns the scheduled calendar date.
    #[must_use]
    pub const fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_date
    }

    /// Returns the scheduled window start, when set.
    #[must_use]
    pub const fn scheduled_start_time(&self) -> Option<NaiveTime> {
        self.scheduled_start_time
    }

    /// Returns the scheduled window end, when set.
    #[must_use]
    pub const fn scheduled_end_time(&self) -> Option<NaiveTime> {
        self.scheduled_end_time
    }

    /// Returns the visit length estimate in minutes, when set.
    #[must_use]
    pub const fn estimated_duration_minutes(&self) -> Option<u32> {
        self.estimated_duration_minutes
    }

    /// Returns the actual start instant, once started.
    #[must_use]
    pub const fn actual_start_time(&self) -> Option<DateTime<Utc>> {
        self.actual_start_time
    }

    /// Returns the actual end instant, once completed.
    #[must_use]
    pub const fn actual_end_time(&self) -> Option<DateTime<Utc>> {
        self.actual_end_time
    }

    /// Returns the measured visit duration in minutes, when both actual
    /// instants are known.
    #[must_use]
    pub const fn actual_duration_minutes(&self) -> Option<i64> {
        self.actual_duration_minutes
    }

    /// Returns the completion notes, when completed with notes.
    #[must_use]
    pub fn completion_notes(&self) -> Option<&str> {
        self.completion_notes.as_deref()
    }

    /// Returns who completed the task, once completed.
    #[must_use]
    pub const fn completed_by(&self) -> Option<UserId> {
        self.completed_by
    }

    /// Returns when the task was completed, once completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the cancellation reason, once cancelled.
    #[must_use]
    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    /// Returns who cancelled the task, once cancelled.
    #[must_use]
    pub const fn cancelled_by(&self) -> Option<UserId> {
        self.cancelled_by
    }

    /// Returns when the task was cancelled, once cancelled.
    #[must_use]
    pub const fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    /// Returns whether the visit is billable.
    #[must_use]
    pub const fn is_billable(&self) -> bool {
        self.is_billable
    }

    /// Returns the billing code, when set.
    #[must_use]
    pub fn billing_code(&self) -> Option<&str> {
        self.billing_code.as_deref()
    }

    /// Returns whether the visit has been billed.
    #[must_use]
    pub const fn billed(&self) -> bool {
        self.billed
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the reschedule audit trail, oldest first.
    #[must_use]
    pub fn reschedules(&self) -> &[RescheduleRecord] {
        &self.reschedules
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

    /// Returns whether the task is overdue at `now`. Never stored.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        schedule::is_overdue(self.scheduled_date, self.status, now)
    }

    /// Returns whether the task is due on the calendar day of `now`.
    #[must_use]
    pub fn is_due_today(&self, now: DateTime<Utc>) -> bool {
        schedule::is_due_today(self.scheduled_date, self.status, now)
    }

    /// Returns whether the task is in an editable status.
    #[must_use]
    pub const fn can_be_edited(&self) -> bool {
        matches!(self.status, TaskStatus::Scheduled | TaskStatus::InProgress)
    }

    /// Returns whether cancellation is currently legal.
    #[must_use]
    pub fn can_be_cancelled(&self) -> bool {
        self.status.can_transition_to(TaskStatus::Cancelled)
    }

    /// Begins the visit, recording the actual start instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// currently [`TaskStatus::Scheduled`].
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Scheduled {
            return Err(self.invalid_transition(TaskStatus::InProgress));
        }
        let now = clock.utc();
        self.actual_start_time = Some(now);
        self.status = TaskStatus::InProgress;
        self.updated_at = now;
        Ok(())
    }

    /// Completes the visit and submits it for QA review.
    ///
    /// Records the completing actor and instant, closes the actual time
    /// window, and derives the measured duration when a start instant is
    /// known. Completing an already-completed task fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// [`TaskStatus::Scheduled`] or [`TaskStatus::InProgress`].
    pub fn complete(
        &mut self,
        by: UserId,
        notes: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(TaskStatus::CompletedPendingQa) {
            return Err(self.invalid_transition(TaskStatus::CompletedPendingQa));
        }
        let now = clock.utc();
        let end = self.actual_end_time.unwrap_or(now);
        self.actual_end_time = Some(end);
        self.actual_duration_minutes = self
            .actual_start_time
            .map(|start| (end - start).num_minutes());
        self.completion_notes = notes;
        self.completed_by = Some(by);
        self.completed_at = Some(now);
        self.review.record_submission(by, now);
        self.status = TaskStatus::CompletedPendingQa;
        self.updated_at = now;
        Ok(())
    }

    /// Moves the task to a new date and re-enters
    /// [`TaskStatus::Scheduled`], resetting any in-progress timing and
    /// appending the prior date to the reschedule audit trail.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyRescheduleReason`] when the reason
    /// is blank, or [`TaskDomainError::InvalidTransition`] when the task is
    /// in a terminal status.
    pub fn reschedule(
        &mut self,
        new_date: NaiveDate,
        reason: impl Into<String>,
        by: UserId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(TaskDomainError::EmptyRescheduleReason);
        }
        if !self.status.can_transition_to(TaskStatus::Scheduled) {
            return Err(self.invalid_transition(TaskStatus::Scheduled));
        }
        let now = clock.utc();
        self.reschedules.push(RescheduleRecord {
            previous_date: self.scheduled_date,
            new_date,
            reason,
            rescheduled_by: by,
            rescheduled_at: now,
        });
        self.scheduled_date = new_date;
        self.actual_start_time = None;
        self.actual_end_time = None;
        self.actual_duration_minutes = None;
        self.status = TaskStatus::Scheduled;
        self.updated_at = now;
        Ok(())
    }

    /// Cancels the task with a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCancellationReason`] when the
    /// reason is blank, or [`TaskDomainError::InvalidTransition`] when the
    /// task has already completed or reached a terminal status.
    pub fn cancel(
        &mut self,
        reason: impl Into<String>,
        by: UserId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(TaskDomainError::EmptyCancellationReason);
        }
        if !self.status.can_transition_to(TaskStatus::Cancelled) {
            return Err(self.invalid_transition(TaskStatus::Cancelled));
        }
        let now = clock.utc();
        self.cancellation_reason = Some(reason);
        self.cancelled_by = Some(by);
        self.cancelled_at = Some(now);
        self.status = TaskStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }

    /// Approves the completed visit, ending its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// awaiting QA, or [`TaskDomainError::Review`] when the review audit
    /// trail rejects the decision.
    pub fn approve_qa(
        &mut self,
        by: UserId,
        comments: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::CompletedPendingQa {
            return Err(self.invalid_transition(TaskStatus::QaApproved));
        }
        let now = clock.utc();
        self.review.ensure_reviewable(now)?;
        self.review.record_review(by, now, comments);
        self.status = TaskStatus::QaApproved;
        self.updated_at = now;
        Ok(())
    }

    /// Returns the completed visit for re-documentation, clearing the
    /// completion audit so the task can be redone from
    /// [`TaskStatus::Scheduled`].
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::EmptyComments`](crate::review::domain::ReviewError::EmptyComments)
    /// when comments are blank, or
    /// [`TaskDomainError::InvalidTransition`] unless the task is awaiting
    /// QA.
    pub fn return_for_correction(
        &mut self,
        by: UserId,
        comments: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let comments = comments.into();
        if comments.trim().is_empty() {
            return Err(crate::review::domain::ReviewError::EmptyComments.into());
        }
        if self.status != TaskStatus::CompletedPendingQa {
            return Err(self.invalid_transition(TaskStatus::Scheduled));
        }
        let now = clock.utc();
        self.review.ensure_reviewable(now)?;
        self.review.record_review(by, now, Some(comments));
        self.completed_by = None;
        self.completed_at = None;
        self.status = TaskStatus::Scheduled;
        self.updated_at = now;
        Ok(())
    }

    /// Marks a scheduled task whose date has passed as missed. Driven by
    /// the scheduler sweep, not by a user action.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotYetMissed`] when the scheduled date
    /// has not passed, or [`TaskDomainError::InvalidTransition`] unless
    /// the task is [`TaskStatus::Scheduled`].
    pub fn mark_missed(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Scheduled {
            return Err(self.invalid_transition(TaskStatus::Missed));
        }
        let now = clock.utc();
        if self.scheduled_date >= now.date_naive() {
            return Err(TaskDomainError::NotYetMissed {
                id: self.id,
                scheduled_date: self.scheduled_date,
            });
        }
        self.status = TaskStatus::Missed;
        self.updated_at = now;
        Ok(())
    }

    /// Marks a scheduled task as a patient no-show.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// [`TaskStatus::Scheduled`].
    pub fn mark_no_show(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Scheduled {
            return Err(self.invalid_transition(TaskStatus::NoShow));
        }
        self.status = TaskStatus::NoShow;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Marks the completed visit as billed. External billing calls this
    /// once billing units have been exported.
    pub fn mark_billed(&mut self, clock: &impl Clock) {
        self.billed = true;
        self.updated_at = clock.utc();
    }

    const fn invalid_transition(&self, to: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidTransition {
            id: self.id,
            from: self.status,
            to,
        }
    }
}

impl Reviewable for Task {
    fn review_meta(&self) -> &ReviewMeta {
        &self.review
    }

    fn is_pending_review(&self) -> bool {
        self.status == TaskStatus::CompletedPendingQa
    }
}
