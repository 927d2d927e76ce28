//! Service layer orchestrating visit task transitions.
//!
//! Every transition runs gate -> load -> domain transition -> persist, in
//! that order: a permission or validation failure returns before any state
//! is read or written.

use crate::access::{Actor, EntityKind, PermissionDenied, PermissionPolicy, WorkflowAction};
use crate::review::domain::{EpisodeId, PatientId, UserId};
use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskId, TaskPriority, TaskType},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{NaiveDate, NaiveTime};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for placing a new visit task on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTaskRequest {
    patient_id: PatientId,
    episode_id: EpisodeId,
    assigned_to: UserId,
    task_type: TaskType,
    scheduled_date: NaiveDate,
    priority: TaskPriority,
    is_urgent: bool,
    scheduled_start_time: Option<NaiveTime>,
    scheduled_end_time: Option<NaiveTime>,
    estimated_duration_minutes: Option<u32>,
    is_billable: bool,
    billing_code: Option<String>,
}

impl ScheduleTaskRequest {
    /// Creates a request with required scheduling fields. Priority defaults
    /// to routine, and the task is neither urgent nor billable until the
    /// builder methods say otherwise.
    #[must_use]
    pub const fn new(
        patient_id: PatientId,
        episode_id: EpisodeId,
        assigned_to: UserId,
        task_type: TaskType,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            patient_id,
            episode_id,
            assigned_to,
            task_type,
            scheduled_date,
            priority: TaskPriority::Routine,
            is_urgent: false,
            scheduled_start_time: None,
            scheduled_end_time: None,
            estimated_duration_minutes: None,
            is_billable: false,
            billing_code: None,
        }
    }

    /// Sets the scheduling priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Flags the visit as clinically urgent.
    #[must_use]
    pub const fn urgent(mut self) -> Self {
        self.is_urgent = true;
        self
    }

    /// Sets the scheduled time window.
    #[must_use]
    pub const fn with_window(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.scheduled_start_time = Some(start);
        self.scheduled_end_time = Some(end);
        self
    }

    /// Sets the visit length estimate in minutes.
    #[must_use]
    pub const fn with_estimated_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration_minutes = Some(minutes);
        self
    }

    /// Marks the visit billable under the given code.
    #[must_use]
    pub fn billable(mut self, billing_code: impl Into<String>) -> Self {
        self.is_billable = true;
        self.billing_code = Some(billing_code.into());
        self
    }
}

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// The actor lacks a sufficient role. No state was touched.
    #[error(transparent)]
    Permission(#[from] PermissionDenied),
    /// Domain validation or transition legality failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task exists under the given identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Result type for task workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Visit task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    permissions: PermissionPolicy,
}

impl<R, C> TaskWorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, permissions: PermissionPolicy) -> Self {
        Self {
            repository,
            clock,
            permissions,
        }
    }

    fn gate(&self, actor: &Actor, action: WorkflowAction) -> Result<(), PermissionDenied> {
        self.permissions.authorize(actor, action, EntityKind::Task)
    }

    async fn load(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(id))
    }

    async fn apply<F>(&self, id: TaskId, mutate: F) -> TaskWorkflowResult<Task>
    where
        F: FnOnce(&mut Task) -> Result<(), TaskDomainError>,
    {
        let mut task = self.load(id).await?;
        mutate(&mut task)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Places a new task on the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] when the actor may not create tasks
    /// or the repository rejects persistence.
    pub async fn schedule(
        &self,
        actor: &Actor,
        request: ScheduleTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        self.gate(actor, WorkflowAction::Create)?;
        let task = Task::schedule(
            NewTask {
                patient_id: request.patient_id,
                episode_id: request.episode_id,
                assigned_to: request.assigned_to,
                task_type: request.task_type,
                priority: request.priority,
                is_urgent: request.is_urgent,
                scheduled_date: request.scheduled_date,
                scheduled_start_time: request.scheduled_start_time,
                scheduled_end_time: request.scheduled_end_time,
                estimated_duration_minutes: request.estimated_duration_minutes,
                is_billable: request.is_billable,
                billing_code: request.billing_code,
            },
            &*self.clock,
        );
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Begins a scheduled visit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] on permission denial, unknown id, or
    /// an illegal transition.
    pub async fn start(&self, actor: &Actor, id: TaskId) -> TaskWorkflowResult<Task> {
        self.gate(actor, WorkflowAction::Start)?;
        self.apply(id, |task| task.start(&*self.clock)).await
    }

    /// Completes a visit and submits it for QA review. Completing twice
    /// fails on the second call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] on permission denial, unknown id, or
    /// an illegal transition.
    pub async fn complete(
        &self,
        actor: &Actor,
        id: TaskId,
        notes: Option<String>,
    ) -> TaskWorkflowResult<Task> {
        self.gate(actor, WorkflowAction::Complete)?;
        let by = actor.id();
        self.apply(id, |task| task.complete(by, notes, &*self.clock))
            .await
    }

    /// Moves a task to a new date with a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] on permission denial, unknown id, a
    /// blank reason, or a terminal-status task.
    pub async fn reschedule(
        &self,
        actor: &Actor,
        id: TaskId,
        new_date: NaiveDate,
        reason: impl Into<String>,
    ) -> TaskWorkflowResult<Task> {
        self.gate(actor, WorkflowAction::Reschedule)?;
        let by = actor.id();
        let reason = reason.into();
        self.apply(id, |task| task.reschedule(new_date, reason, by, &*self.clock))
            .await
    }

    /// Cancels a task with a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] on permission denial, unknown id, a
    /// blank reason, or a task past the point of cancellation.
    pub async fn cancel(
        &self,
        actor: &Actor,
        id: TaskId,
        reason: impl Into<String>,
    ) -> TaskWorkflowResult<Task> {
        self.gate(actor, WorkflowAction::Cancel)?;
        let by = actor.id();
        let reason = reason.into();
        self.apply(id, |task| task.cancel(reason, by, &*self.clock))
            .await
    }

    /// Marks a scheduled task as a patient no-show.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] on permission denial, unknown id, or
    /// an illegal transition.
    pub async fn mark_no_show(&self, actor: &Actor, id: TaskId) -> TaskWorkflowResult<Task> {
        self.gate(actor, WorkflowAction::Update)?;
        self.apply(id, |task| task.mark_no_show(&*self.clock)).await
    }

    /// Marks a scheduled task whose date has passed as missed. Invoked by
    /// the scheduler sweep rather than a user, so it takes no actor.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] on unknown id, an unexpired date, or
    /// an illegal transition.
    pub async fn mark_missed(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.apply(id, |task| task.mark_missed(&*self.clock)).await
    }

    /// Approves a completed visit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] on permission denial, unknown id, or
    /// a task not awaiting QA.
    pub async fn approve_qa(
        &self,
        actor: &Actor,
        id: TaskId,
        comments: Option<String>,
    ) -> TaskWorkflowResult<Task> {
        self.gate(actor, WorkflowAction::Approve)?;
        let by = actor.id();
        self.apply(id, |task| task.approve_qa(by, comments, &*self.clock))
            .await
    }

    /// Returns a completed visit for re-documentation with mandatory
    /// comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError`] on permission denial, unknown id,
    /// blank comments, or a task not awaiting QA.
    pub async fn return_for_correction(
        &self,
        actor: &Actor,
        id: TaskId,
        comments: impl Into<String>,
    ) -> TaskWorkflowResult<Task> {
        self.gate(actor, WorkflowAction::Return)?;
        let by = actor.id();
        let comments = comments.into();
        self.apply(id, |task| {
            task.return_for_correction(by, comments, &*self.clock)
        })
        .await
    }

    /// Returns all tasks awaiting QA review. List authorization lives with
    /// the backing store, which may answer
    /// [`TaskRepositoryError::Forbidden`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the fetch fails.
    pub async fn pending_reviews(&self) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.repository.find_pending_review().await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] when no task exists under
    /// the identifier.
    pub async fn get(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.load(id).await
    }

    /// Returns all tasks for the given patient.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the fetch fails.
    pub async fn find_by_patient(&self, patient_id: PatientId) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.repository.find_by_patient(patient_id).await?)
    }

    /// Returns all tasks for the given episode of care.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when the fetch fails.
    pub async fn find_by_episode(&self, episode_id: EpisodeId) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.repository.find_by_episode(episode_id).await?)
    }
}
