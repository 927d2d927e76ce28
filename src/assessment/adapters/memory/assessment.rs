//! In-memory repository for assessment workflow tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::assessment::{
    domain::{AssessmentId, OasisAssessment},
    ports::{AssessmentRepository, AssessmentRepositoryError, AssessmentRepositoryResult},
};
use crate::review::domain::{EpisodeId, PatientId, Reviewable};

/// Thread-safe in-memory assessment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentRepository {
    state: Arc<RwLock<InMemoryAssessmentState>>,
}

#[derive(Debug, Default)]
struct InMemoryAssessmentState {
    assessments: HashMap<AssessmentId, OasisAssessment>,
    patient_index: HashMap<PatientId, Vec<AssessmentId>>,
    episode_index: HashMap<EpisodeId, Vec<AssessmentId>>,
}

impl InMemoryAssessmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn collect_by_ids(
    state: &InMemoryAssessmentState,
    ids: Option<&Vec<AssessmentId>>,
) -> Vec<OasisAssessment> {
    ids.map(|ids| {
        ids.iter()
            .filter_map(|id| state.assessments.get(id).cloned())
            .collect()
    })
    .unwrap_or_default()
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn store(&self, assessment: &OasisAssessment) -> AssessmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AssessmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.assessments.contains_key(&assessment.id()) {
            return Err(AssessmentRepositoryError::DuplicateAssessment(
                assessment.id(),
            ));
        }
        state
            .patient_index
            .entry(assessment.patient_id())
            .or_default()
            .push(assessment.id());
        state
            .episode_index
            .entry(assessment.episode_id())
            .or_default()
            .push(assessment.id());
        state.assessments.insert(assessment.id(), assessment.clone());
        Ok(())
    }

    async fn update(&self, assessment: &OasisAssessment) -> AssessmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AssessmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.assessments.contains_key(&assessment.id()) {
            return Err(AssessmentRepositoryError::NotFound(assessment.id()));
        }
        state.assessments.insert(assessment.id(), assessment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: AssessmentId,
    ) -> AssessmentRepositoryResult<Option<OasisAssessment>> {
        let state = self.state.read().map_err(|err| {
            AssessmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.assessments.get(&id).cloned())
    }

    async fn find_pending_review(&self) -> AssessmentRepositoryResult<Vec<OasisAssessment>> {
        let state = self.state.read().map_err(|err| {
            AssessmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .assessments
            .values()
            .filter(|assessment| assessment.is_pending_review())
            .cloned()
            .collect())
    }

    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> AssessmentRepositoryResult<Vec<OasisAssessment>> {
        let state = self.state.read().map_err(|err| {
            AssessmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(collect_by_ids(&state, state.patient_index.get(&patient_id)))
    }

    async fn find_by_episode(
        &self,
        episode_id: EpisodeId,
    ) -> AssessmentRepositoryResult<Vec<OasisAssessment>> {
        let state = self.state.read().map_err(|err| {
            AssessmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(collect_by_ids(&state, state.episode_index.get(&episode_id)))
    }
}
