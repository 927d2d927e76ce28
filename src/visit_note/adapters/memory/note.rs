//! In-memory repository for visit note workflow tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::review::domain::{EpisodeId, PatientId, Reviewable};
use crate::task::domain::TaskId;
use crate::visit_note::{
    domain::{VisitNote, VisitNoteId},
    ports::{VisitNoteRepository, VisitNoteRepositoryError, VisitNoteRepositoryResult},
};

/// Thread-safe in-memory visit note repository enforcing the one-to-one
/// task link.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVisitNoteRepository {
    state: Arc<RwLock<InMemoryVisitNoteState>>,
}

#[derive(Debug, Default)]
struct InMemoryVisitNoteState {
    notes: HashMap<VisitNoteId, VisitNote>,
    task_index: HashMap<TaskId, VisitNoteId>,
    patient_index: HashMap<PatientId, Vec<VisitNoteId>>,
    episode_index: HashMap<EpisodeId, Vec<VisitNoteId>>,
}

impl InMemoryVisitNoteRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Checks the unique task link, ignoring the note's own existing entry.
fn ensure_task_link_free(
    state: &InMemoryVisitNoteState,
    note: &VisitNote,
) -> VisitNoteRepositoryResult<()> {
    if let Some(task_id) = note.task_id() {
        if let Some(existing) = state.task_index.get(&task_id) {
            if *existing != note.id() {
                return Err(VisitNoteRepositoryError::DuplicateTaskLink(task_id));
            }
        }
    }
    Ok(())
}

fn collect_by_ids(
    state: &InMemoryVisitNoteState,
    ids: Option<&Vec<VisitNoteId>>,
) -> Vec<VisitNote> {
    ids.map(|ids| {
        ids.iter()
            .filter_map(|id| state.notes.get(id).cloned())
            .collect()
    })
    .unwrap_or_default()
}

#[async_trait]
impl VisitNoteRepository for InMemoryVisitNoteRepository {
    async fn store(&self, note: &VisitNote) -> VisitNoteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            VisitNoteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.notes.contains_key(&note.id()) {
            return Err(VisitNoteRepositoryError::DuplicateNote(note.id()));
        }
        ensure_task_link_free(&state, note)?;

        if let Some(task_id) = note.task_id() {
            state.task_index.insert(task_id, note.id());
        }
        state
            .patient_index
            .entry(note.patient_id())
            .or_default()
            .push(note.id());
        state
            .episode_index
            .entry(note.episode_id())
            .or_default()
            .push(note.id());
        state.notes.insert(note.id(), note.clone());
        Ok(())
    }

    async fn update(&self, note: &VisitNote) -> VisitNoteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            VisitNoteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.notes.contains_key(&note.id()) {
            return Err(VisitNoteRepositoryError::NotFound(note.id()));
        }
        ensure_task_link_free(&state, note)?;

        if let Some(task_id) = note.task_id() {
            state.task_index.insert(task_id, note.id());
        }
        state.notes.insert(note.id(), note.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: VisitNoteId) -> VisitNoteRepositoryResult<Option<VisitNote>> {
        let state = self.state.read().map_err(|err| {
            VisitNoteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.notes.get(&id).cloned())
    }

    async fn find_by_task(&self, task_id: TaskId) -> VisitNoteRepositoryResult<Option<VisitNote>> {
        let state = self.state.read().map_err(|err| {
            VisitNoteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .task_index
            .get(&task_id)
            .and_then(|note_id| state.notes.get(note_id))
            .cloned())
    }

    async fn find_pending_review(&self) -> VisitNoteRepositoryResult<Vec<VisitNote>> {
        let state = self.state.read().map_err(|err| {
            VisitNoteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .notes
            .values()
            .filter(|note| note.is_pending_review())
            .cloned()
            .collect())
    }

    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> VisitNoteRepositoryResult<Vec<VisitNote>> {
        let state = self.state.read().map_err(|err| {
            VisitNoteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(collect_by_ids(&state, state.patient_index.get(&patient_id)))
    }

    async fn find_by_episode(
        &self,
        episode_id: EpisodeId,
    ) -> VisitNoteRepositoryResult<Vec<VisitNote>> {
        let state = self.state.read().map_err(|err| {
            VisitNoteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(collect_by_ids(&state, state.episode_index.get(&episode_id)))
    }
}
