//! Repository port for visit note persistence and worklist queries.

use crate::review::domain::{EpisodeId, PatientId};
use crate::task::domain::TaskId;
use crate::visit_note::domain::{VisitNote, VisitNoteId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for visit note repository operations.
pub type VisitNoteRepositoryResult<T> = Result<T, VisitNoteRepositoryError>;

/// Visit note persistence contract.
///
/// Implementations must guarantee the task link is unique: at most one
/// note may reference a given task.
#[async_trait]
pub trait VisitNoteRepository: Send + Sync {
    /// Stores a new visit note.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteRepositoryError::DuplicateNote`] when the note
    /// ID already exists, or
    /// [`VisitNoteRepositoryError::DuplicateTaskLink`] when another note
    /// already documents the linked task.
    async fn store(&self, note: &VisitNote) -> VisitNoteRepositoryResult<()>;

    /// Persists changes to an existing visit note.
    ///
    /// # Errors
    ///
    /// Returns [`VisitNoteRepositoryError::NotFound`] when the note does
    /// not exist, or [`VisitNoteRepositoryError::DuplicateTaskLink`] when
    /// the updated task link collides with another note.
    async fn update(&self, note: &VisitNote) -> VisitNoteRepositoryResult<()>;

    /// Finds a visit note by identifier.
    ///
    /// Returns `None` when the note does not exist.
    async fn find_by_id(&self, id: VisitNoteId) -> VisitNoteRepositoryResult<Option<VisitNote>>;

    /// Finds the note documenting the given task, when one exists.
    async fn find_by_task(&self, task_id: TaskId) -> VisitNoteRepositoryResult<Option<VisitNote>>;

    /// Returns all visit notes awaiting QA review.
    async fn find_pending_review(&self) -> VisitNoteRepositoryResult<Vec<VisitNote>>;

    /// Returns all visit notes for the given patient.
    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> VisitNoteRepositoryResult<Vec<VisitNote>>;

    /// Returns all visit notes for the given episode of care.
    async fn find_by_episode(
        &self,
        episode_id: EpisodeId,
    ) -> VisitNoteRepositoryResult<Vec<VisitNote>>;
}

/// Errors returned by visit note repository implementations.
#[derive(Debug, Clone, Error)]
pub enum VisitNoteRepositoryError {
    /// A note with the same identifier already exists.
    #[error("duplicate visit note identifier: {0}")]
    DuplicateNote(VisitNoteId),

    /// Another note already documents the task.
    #[error("task {0} already has a visit note")]
    DuplicateTaskLink(TaskId),

    /// The note was not found.
    #[error("visit note not found: {0}")]
    NotFound(VisitNoteId),

    /// The backing store refused the caller access.
    #[error("access to visit note records denied: {0}")]
    Forbidden(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl VisitNoteRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
