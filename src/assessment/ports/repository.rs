//! Repository port for assessment persistence and worklist queries.

use crate::assessment::domain::{AssessmentId, OasisAssessment};
use crate::review::domain::{EpisodeId, PatientId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for assessment repository operations.
pub type AssessmentRepositoryResult<T> = Result<T, AssessmentRepositoryError>;

/// Assessment persistence contract.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Stores a new assessment.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentRepositoryError::DuplicateAssessment`] when the
    /// assessment ID already exists.
    async fn store(&self, assessment: &OasisAssessment) -> AssessmentRepositoryResult<()>;

    /// Persists changes to an existing assessment.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentRepositoryError::NotFound`] when the assessment
    /// does not exist.
    async fn update(&self, assessment: &OasisAssessment) -> AssessmentRepositoryResult<()>;

    /// Finds an assessment by identifier.
    ///
    /// Returns `None` when the assessment does not exist.
    async fn find_by_id(
        &self,
        id: AssessmentId,
    ) -> AssessmentRepositoryResult<Option<OasisAssessment>>;

    /// Returns all assessments awaiting QA review.
    async fn find_pending_review(&self) -> AssessmentRepositoryResult<Vec<OasisAssessment>>;

    /// Returns all assessments for the given patient.
    async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> AssessmentRepositoryResult<Vec<OasisAssessment>>;

    /// Returns all assessments for the given episode of care.
    async fn find_by_episode(
        &self,
        episode_id: EpisodeId,
    ) -> AssessmentRepositoryResult<Vec<OasisAssessment>>;
}

/// Errors returned by assessment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssessmentRepositoryError {
    /// An assessment with the same identifier already exists.
    #[error("duplicate assessment identifier: {0}")]
    DuplicateAssessment(AssessmentId),

    /// The assessment was not found.
    #[error("assessment not found: {0}")]
    NotFound(AssessmentId),

    /// The backing store refused the caller access.
    #[error("access to assessment records denied: {0}")]
    Forbidden(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssessmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
