//! Service layer orchestrating assessment transitions.

use crate::access::{Actor, EntityKind, PermissionDenied, PermissionPolicy, WorkflowAction};
use crate::assessment::{
    domain::{
        AssessmentDomainError, AssessmentId, AssessmentType, CompletionPercentage, NewAssessment,
        OasisAssessment,
    },
    ports::{AssessmentRepository, AssessmentRepositoryError},
};
use crate::review::domain::{EpisodeId, PatientId, ReviewDecision};
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for opening a new assessment draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAssessmentRequest {
    patient_id: PatientId,
    episode_id: EpisodeId,
    assessment_type: AssessmentType,
    assessment_date: NaiveDate,
}

impl OpenAssessmentRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub const fn new(
        patient_id: PatientId,
        episode_id: EpisodeId,
        assessment_type: AssessmentType,
        assessment_date: NaiveDate,
    ) -> Self {
        Self {
            patient_id,
            episode_id,
            assessment_type,
            assessment_date,
        }
    }
}

/// Service-level errors for assessment workflow operations.
#[derive(Debug, Error)]
pub enum AssessmentWorkflowError {
    /// The actor lacks a sufficient role. No state was touched.
    #[error(transparent)]
    Permission(#[from] PermissionDenied),
    /// Domain validation or transition legality failed.
    #[error(transparent)]
    Domain(#[from] AssessmentDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AssessmentRepositoryError),
    /// No assessment exists under the given identifier.
    #[error("assessment not found: {0}")]
    NotFound(AssessmentId),
}

/// Result type for assessment workflow service operations.
pub type AssessmentWorkflowResult<T> = Result<T, AssessmentWorkflowError>;

/// Assessment workflow orchestration service.
#[derive(Clone)]
pub struct AssessmentWorkflowService<R, C>
where
    R: AssessmentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    permissions: PermissionPolicy,
}

impl<R, C> AssessmentWorkflowService<R, C>
where
    R: AssessmentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new assessment workflow service.
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
            .authorize(actor, action, EntityKind::Assessment)
    }

    async fn load(&self, id: AssessmentId) -> AssessmentWorkflowResult<OasisAssessment> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AssessmentWorkflowError::NotFound(id))
    }

    async fn apply<F>(&self, id: AssessmentId, mutate: F) -> AssessmentWorkflowResult<OasisAssessment>
    where
        F: FnOnce(&mut OasisAssessment) -> Result<(), AssessmentDomainError>,
    {
        let mut assessment = self.load(id).await?;
        mutate(&mut assessment)?;
        self.repository.update(&assessment).await?;
        Ok(assessment)
    }

    /// Opens a new assessment draft.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError`] when the actor may not create
    /// assessments or the repository rejects persistence.
    pub async fn open(
        &self,
        actor: &Actor,
        request: OpenAssessmentRequest,
    ) -> AssessmentWorkflowResult<OasisAssessment> {
        self.gate(actor, WorkflowAction::Create)?;
        let assessment = OasisAssessment::open(
            NewAssessment {
                patient_id: request.patient_id,
                episode_id: request.episode_id,
                assessment_type: request.assessment_type,
                assessment_date: request.assessment_date,
            },
            &*self.clock,
        );
        self.repository.store(&assessment).await?;
        Ok(assessment)
    }

    /// Autosaves drafted instrument data and completion progress.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError`] on permission denial, unknown
    /// id, or a non-draft assessment.
    pub async fn auto_save(
        &self,
        actor: &Actor,
        id: AssessmentId,
        clinical_data: Value,
        completion: CompletionPercentage,
    ) -> AssessmentWorkflowResult<OasisAssessment> {
        self.gate(actor, WorkflowAction::Update)?;
        self.apply(id, |assessment| {
            assessment.auto_save(clinical_data, completion, &*self.clock)
        })
        .await
    }

    /// Submits a complete assessment for QA review.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError`] on permission denial, unknown
    /// id, an incomplete instrument, or an illegal transition.
    pub async fn submit(
        &self,
        actor: &Actor,
        id: AssessmentId,
    ) -> AssessmentWorkflowResult<OasisAssessment> {
        self.gate(actor, WorkflowAction::SubmitForReview)?;
        let by = actor.id();
        self.apply(id, |assessment| assessment.submit(by, &*self.clock))
            .await
    }

    /// Records a QA decision over a submitted assessment.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError`] on permission denial, unknown
    /// id, missing return comments, or an assessment not awaiting review.
    pub async fn review(
        &self,
        actor: &Actor,
        id: AssessmentId,
        decision: ReviewDecision,
        comments: Option<String>,
    ) -> AssessmentWorkflowResult<OasisAssessment> {
        let action = match decision {
            ReviewDecision::Approve => WorkflowAction::Approve,
            ReviewDecision::Return => WorkflowAction::Return,
        };
        self.gate(actor, action)?;
        let by = actor.id();
        self.apply(id, |assessment| {
            assessment.review(decision, by, comments, &*self.clock)
        })
        .await
    }

    /// Reopens a rejected assessment for correction.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError`] on permission denial, unknown
    /// id, or an assessment that was not rejected.
    pub async fn back_to_draft(
        &self,
        actor: &Actor,
        id: AssessmentId,
    ) -> AssessmentWorkflowResult<OasisAssessment> {
        self.gate(actor, WorkflowAction::Update)?;
        self.apply(id, |assessment| assessment.back_to_draft(&*self.clock))
            .await
    }

    /// Locks an approved assessment against further change.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError`] on permission denial, unknown
    /// id, or an assessment that is not approved.
    pub async fn lock(
        &self,
        actor: &Actor,
        id: AssessmentId,
    ) -> AssessmentWorkflowResult<OasisAssessment> {
        self.gate(actor, WorkflowAction::Lock)?;
        self.apply(id, |assessment| assessment.lock(&*self.clock))
            .await
    }

    /// Returns all assessments awaiting QA review. List authorization
    /// lives with the backing store, which may answer
    /// [`AssessmentRepositoryError::Forbidden`].
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError::Repository`] when the fetch
    /// fails.
    pub async fn pending_reviews(&self) -> AssessmentWorkflowResult<Vec<OasisAssessment>> {
        Ok(self.repository.find_pending_review().await?)
    }

    /// Retrieves an assessment by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError::NotFound`] when no assessment
    /// exists under the identifier.
    pub async fn get(&self, id: AssessmentId) -> AssessmentWorkflowResult<OasisAssessment> {
        self.load(id).await
    }

    /// Returns all assessments for the given patient.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError::Repository`] when the fetch
    /// fails.
    pub async fn find_by_patient(
        &self,
        patient_id: PatientId,
    ) -> AssessmentWorkflowResult<Vec<OasisAssessment>> {
        Ok(self.repository.find_by_patient(patient_id).await?)
    }

    /// Returns all assessments for the given episode of care.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentWorkflowError::Repository`] when the fetch
    /// fails.
    pub async fn find_by_episode(
        &self,
        episode_id: EpisodeId,
    ) -> AssessmentWorkflowResult<Vec<OasisAssessment>> {
        Ok(self.repository.find_by_episode(episode_id).await?)
    }
}
