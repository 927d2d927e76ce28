//! Service layer orchestrating visit note transitions.

use crate::access::{Actor, EntityKind, PermissionDenied, PermissionPolicy, WorkflowAction};
use crate::review::domain::{EpisodeId, PatientId};
use crate::task::domain::TaskId;
use crate::visit_note::{
    domain::{NewVisitNote, VisitNote, VisitNoteDomainError, VisitNoteId, VisitType},
    ports::{VisitNoteRepository, VisitNoteRepositoryError},
};
use chrono::{NaiveDate, NaiveTime};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for opening a new visit note draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenVisitNoteRequest {
    patient_id: PatientId,
    episode_id: EpisodeId,
    visit_type: VisitType,
    task_id: Option<TaskId>,
}

impl OpenVisitNoteRequest {
    /// Creates a request with the required fields. The task link may be
    /// deferred to [`link_task`](VisitNoteWorkflowService::link_task) but
    /// is mandatory before submission.
    #[must_use]
    pub const fn new(patient_id: PatientId, episode_id: EpisodeId, visit_type: VisitType) -> Self {
        Self {
            patient_id,
            episode_id,
            visit_type,
            task_id: None,
        }
    }

    /// Links the note to its visit task at creation.
    #[must_use]
    pub const fn for_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }
}

/// Service-level errors for visit note workflow operations.
#[derive(Debug, Error)]
pub enum VisitNoteWorkflowError {
    /// The actor lacks a sufficient role. No state was touched.
    #[error(transparent)]
    Permission(#[from] PermissionDenied),
    /// Domain validation or transition legality failed.
    #[error(transparent)]
    Domain(#[from] VisitNoteDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] VisitNoteRepositoryError),
    /// No visit note exists under the given identifier.
    #[error("visit note not found: {0}")]
    NotFound(VisitNoteId),
}

/// Result type for visit note workflow service operations.
pub type VisitNoteWorkflowResult<T> = Result<T, VisitNoteWorkflowError>;

/// Visit note workflow orchestration service.
#[derive(Clone)]
pub struct VisitNoteWorkflowService<R, C>
where
    R: VisitNoteRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    permissions: PermissionPolicy,
}

impl<R, C> VisitNoteWorkflowService<R, C>
where
    R: VisitNoteRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new visit note workflow service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, permissions: PermissionPolicy) -> Self {
        Self {
            repository,
            clock,
            permissions,
        }
    }

    fn gate(&self, actor: &Actor, action: WorkflowAction) -> Result<(), PermissionDenied> {
        self.permissions
            .authorize(actor, action, EntityKind::VisitNote)
    }

    async fn load(&self, id: VisitNoteId) -> VisitNoteWorkflowResult<VisitNote> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(VisitNoteWorkflowError::NotFound(id))
    }

    async fn apply<F>(&self, id: VisitNoteId, mutate: F) -> VisitNoteWorkflowResult<VisitNote>
    where
        F: FnOnce(&mut VisitNote) -> Result<(), VisitNoteDomainError>,
    {
        let mut note = self.load(id).await?;
        mutate(&mut note)?;
        self.repository.update(&note).await?;
        Ok(note)
    }

    /// Opens a new visit note draft.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError`] when the actor may not create
    /// notes, another note already documents the linked task, or the
    /// repository rejects persistence.
    pub async fn open(
        &self,
        actor: &Actor,
        request: OpenVisitNoteRequest,
    ) -> VisitNoteWorkflowResult<VisitNote> {
        self.gate(actor, WorkflowAction::Create)?;
        let note = VisitNote::open(
            NewVisitNote {
                task_id: request.task_id,
                patient_id: request.patient_id,
                episode_id: request.episode_id,
                visit_type: request.visit_type,
            },
            &*self.clock,
        );
        self.repository.store(&note).await?;
        Ok(note)
    }

    /// Links a draft note to its visit task.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError`] on permission denial, unknown
    /// id, an existing link, or a non-editable note.
    pub async fn link_task(
        &self,
        actor: &Actor,
        id: VisitNoteId,
        task_id: TaskId,
    ) -> VisitNoteWorkflowResult<VisitNote> {
        self.gate(actor, WorkflowAction::Update)?;
        self.apply(id, |note| note.link_task(task_id, &*self.clock))
            .await
    }

    /// Records the visit date and optional time window.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError`] on permission denial, unknown
    /// id, or a non-editable note.
    pub async fn set_visit_window(
        &self,
        actor: &Actor,
        id: VisitNoteId,
        date: NaiveDate,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
    ) -> VisitNoteWorkflowResult<VisitNote> {
        self.gate(actor, WorkflowAction::Update)?;
        self.apply(id, |note| note.set_visit_window(date, start, end, &*self.clock))
            .await
    }

    /// Replaces the clinical narrative payload.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError`] on permission denial, unknown
    /// id, or a non-editable note.
    pub async fn update_narrative(
        &self,
        actor: &Actor,
        id: VisitNoteId,
        narrative: Value,
    ) -> VisitNoteWorkflowResult<VisitNote> {
        self.gate(actor, WorkflowAction::Update)?;
        self.apply(id, |note| note.update_narrative(narrative, &*self.clock))
            .await
    }

    /// Submits the note for QA review.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError`] on permission denial, unknown
    /// id, a missing task link or visit date, or an illegal transition.
    pub async fn submit(
        &self,
        actor: &Actor,
        id: VisitNoteId,
    ) -> VisitNoteWorkflowResult<VisitNote> {
        self.gate(actor, WorkflowAction::SubmitForReview)?;
        let by = actor.id();
        self.apply(id, |note| note.submit(by, &*self.clock)).await
    }

    /// Approves a submitted note.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError`] on permission denial, unknown
    /// id, or a note not awaiting review.
    pub async fn approve(
        &self,
        actor: &Actor,
        id: VisitNoteId,
        comments: Option<String>,
    ) -> VisitNoteWorkflowResult<VisitNote> {
        self.gate(actor, WorkflowAction::Approve)?;
        let by = actor.id();
        self.apply(id, |note| note.approve(by, comments, &*self.clock))
            .await
    }

    /// Returns a submitted note for correction with mandatory comments.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError`] on permission denial, unknown
    /// id, blank comments, or a note not awaiting review.
    pub async fn return_for_correction(
        &self,
        actor: &Actor,
        id: VisitNoteId,
        comments: impl Into<String>,
    ) -> VisitNoteWorkflowResult<VisitNote> {
        self.gate(actor, WorkflowAction::Return)?;
        let by = actor.id();
        let comments = comments.into();
        self.apply(id, |note| {
            note.return_for_correction(by, comments, &*self.clock)
        })
        .await
    }

    /// Moves a returned note back to draft.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError`] on permission denial, unknown
    /// id, or a note that was not returned.
    pub async fn back_to_draft(
        &self,
        actor: &Actor,
        id: VisitNoteId,
    ) -> VisitNoteWorkflowResult<VisitNote> {
        self.gate(actor, WorkflowAction::Update)?;
        self.apply(id, |note| note.back_to_draft(&*self.clock)).await
    }

    /// Returns all visit notes awaiting QA review. List authorization
    /// lives with the backing store, which may answer
    /// [`VisitNoteRepositoryError::Forbidden`].
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError::Repository`] when the fetch
    /// fails.
    pub async fn pending_reviews(&self) -> VisitNoteWorkflowResult<Vec<VisitNote>> {
        Ok(self.repository.find_pending_review().await?)
    }

    /// Retrieves a visit note by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError::NotFound`] when no note exists
    /// under the identifier.
    pub async fn get(&self, id: VisitNoteId) -> VisitNoteWorkflowResult<VisitNote> {
        self.load(id).await
    }

    /// Finds the note documenting the given task, when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError::Repository`] when the fetch
    /// fails.
    pub async fn find_by_task(
        &self,
        task_id: TaskId,
    ) -> VisitNoteWorkflowResult<Option<VisitNote>> {
        Ok(self.repository.find_by_task(task_id).await?)
    }

    /// Returns all visit notes for the given patient.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError::Repository`] when the fetch
    /// fails.
    pub async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> VisitNoteWorkflowResult<Vec<VisitNote>> {
        Ok(self.repository.find_by_patient(patient_id).await?)
    }

    /// Returns all visit notes for the given episode of care.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteWorkflowError::Repository`] when the fetch
    /// fails.
    pub async fn find_by_episode(
        &self,
        episode_id: EpisodeId,
    ) -> VisitNoteWorkflowResult<Vec<VisitNote>> {
        Ok(self.repository.find_by_episode(episode_id).await?)
    }
}
