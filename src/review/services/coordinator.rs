//! Unified QA review coordinator across tasks, assessments, and visit
//! notes.
//!
//! The coordinator is a read/write facade for the review screen: one
//! worklist of everything pending review, and one dispatch entry point
//! that routes a decision to the owning state machine.

use crate::access::{Actor, EntityKind};
use crate::assessment::{
    domain::{AssessmentId, AssessmentType, OasisAssessment},
    ports::AssessmentRepository,
    services::{AssessmentWorkflowError, AssessmentWorkflowService},
};
use crate::review::domain::{Reviewable, ReviewDecision};
use crate::task::{
    domain::{Task, TaskId, TaskType},
    ports::TaskRepository,
    services::{TaskWorkflowError, TaskWorkflowService},
};
use crate::visit_note::{
    domain::{VisitNote, VisitNoteId},
    ports::VisitNoteRepository,
    services::{VisitNoteWorkflowError, VisitNoteWorkflowService},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use thiserror::Error;

/// One reviewable entity, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewItem {
    /// A visit task awaiting or leaving QA review.
    Task(Task),
    /// An OASIS assessment awaiting or leaving QA review.
    Assessment(OasisAssessment),
    /// A visit note awaiting or leaving QA review.
    VisitNote(VisitNote),
}

impl ReviewItem {
    /// Returns the entity kind of the wrapped item.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Task(_) => EntityKind::Task,
            Self::Assessment(_) => EntityKind::Assessment,
            Self::VisitNote(_) => EntityKind::VisitNote,
        }
    }

    /// Returns when the wrapped item was submitted for review, when it
    /// has been.
    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Task(task) => task.review_meta().submitted_at(),
            Self::Assessment(assessment) => assessment.review_meta().submitted_at(),
            Self::VisitNote(note) => note.review_meta().submitted_at(),
        }
    }
}

/// A sub-source fetch failure surfaced once per source, never aborting
/// the other sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWarning {
    /// Source whose pending list could not be fetched.
    pub kind: EntityKind,
    /// Human-readable failure description.
    pub message: String,
}

/// The combined pending-review worklist, oldest submission first, plus
/// any per-source fetch warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingReviews {
    /// Everything awaiting review, across all three kinds.
    pub items: Vec<ReviewItem>,
    /// One warning per failed sub-source.
    pub warnings: Vec<FetchWarning>,
}

/// Identifies the entity a review decision targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    /// A visit task awaiting QA.
    Task(TaskId),
    /// A submitted OASIS assessment.
    Assessment(AssessmentId),
    /// A submitted visit note.
    VisitNote(VisitNoteId),
}

/// A single review decision to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    /// Entity the decision targets.
    pub target: ReviewTarget,
    /// Decision reached by the reviewer.
    pub decision: ReviewDecision,
    /// Reviewer comments; mandatory when returning work.
    pub comments: Option<String>,
}

/// Errors surfaced while dispatching a review decision.
#[derive(Debug, Error)]
pub enum QaReviewError {
    /// The task state machine rejected the decision.
    #[error(transparent)]
    Task(#[from] TaskWorkflowError),
    /// The assessment state machine rejected the decision.
    #[error(transparent)]
    Assessment(#[from] AssessmentWorkflowError),
    /// The visit note state machine rejected the decision.
    #[error(transparent)]
    VisitNote(#[from] VisitNoteWorkflowError),
}

/// Result type for coordinator operations.
pub type QaReviewResult<T> = Result<T, QaReviewError>;

/// Facade aggregating the three workflow services behind the QA review
/// screen.
#[derive(Clone)]
pub struct QaReviewCoordinator<TR, AR, NR, C>
where
    TR: TaskRepository,
    AR: AssessmentRepository,
    NR: VisitNoteRepository,
    C: Clock + Send + Sync,
{
    tasks: TaskWorkflowService<TR, C>,
    assessments: AssessmentWorkflowService<AR, C>,
    notes: VisitNoteWorkflowService<NR, C>,
}

impl<TR, AR, NR, C> QaReviewCoordinator<TR, AR, NR, C>
where
    TR: TaskRepository,
    AR: AssessmentRepository,
    NR: VisitNoteRepository,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator over the three workflow services.
    #[must_use]
    pub const fn new(
        tasks: TaskWorkflowService<TR, C>,
        assessments: AssessmentWorkflowService<AR, C>,
        notes: VisitNoteWorkflowService<NR, C>,
    ) -> Self {
        Self {
            tasks,
            assessments,
            notes,
        }
    }

    /// Loads the combined pending-review worklist.
    ///
    /// Each sub-source is fetched in isolation: a failing source
    /// contributes an empty list and exactly one [`FetchWarning`], and
    /// never aborts the other two fetches. Items are ordered oldest
    /// submission first.
    pub async fn load_pending_reviews(&self) -> PendingReviews {
        let mut pending = PendingReviews::default();

        match self.tasks.pending_reviews().await {
            Ok(tasks) => pending.items.extend(tasks.into_iter().map(ReviewItem::Task)),
            Err(err) => pending.warnings.push(FetchWarning {
                kind: EntityKind::Task,
                message: err.to_string(),
            }),
        }
        match self.assessments.pending_reviews().await {
            Ok(assessments) => pending
                .items
                .extend(assessments.into_iter().map(ReviewItem::Assessment)),
            Err(err) => pending.warnings.push(FetchWarning {
                kind: EntityKind::Assessment,
                message: err.to_string(),
            }),
        }
        match self.notes.pending_reviews().await {
            Ok(notes) => pending
                .items
                .extend(notes.into_iter().map(ReviewItem::VisitNote)),
            Err(err) => pending.warnings.push(FetchWarning {
                kind: EntityKind::VisitNote,
                message: err.to_string(),
            }),
        }

        pending.items.sort_by_key(|item| {
            item.submitted_at()
                .map_or(i64::MAX, |at| at.timestamp_micros())
        });
        pending
    }

    /// Routes a review decision to the owning state machine and returns
    /// the updated entity.
    ///
    /// # Errors
    ///
    /// Returns [`QaReviewError`] when the owning machine rejects the
    /// decision: permission denial, unknown id, missing return comments,
    /// or an entity not awaiting review.
    pub async fn submit_review(
        &self,
        actor: &Actor,
        request: ReviewRequest,
    ) -> QaReviewResult<ReviewItem> {
        let ReviewRequest {
            target,
            decision,
            comments,
        } = request;
        match target {
            ReviewTarget::Task(id) => {
                let task = match decision {
                    ReviewDecision::Approve => self.tasks.approve_qa(actor, id, comments).await?,
                    ReviewDecision::Return => {
                        self.tasks
                            .return_for_correction(actor, id, comments.unwrap_or_default())
                            .await?
                    }
                };
                Ok(ReviewItem::Task(task))
            }
            ReviewTarget::Assessment(id) => {
                let assessment = self
                    .assessments
                    .review(actor, id, decision, comments)
                    .await?;
                Ok(ReviewItem::Assessment(assessment))
            }
            ReviewTarget::VisitNote(id) => {
                let note = match decision {
                    ReviewDecision::Approve => self.notes.approve(actor, id, comments).await?,
                    ReviewDecision::Return => {
                        self.notes
                            .return_for_correction(actor, id, comments.unwrap_or_default())
                            .await?
                    }
                };
                Ok(ReviewItem::VisitNote(note))
            }
        }
    }

    /// Correlates an OASIS-type task with its assessment by episode and
    /// assessment type. The two are not foreign-keyed; this read-side
    /// correlation is the only cross-entity link the core offers.
    ///
    /// Returns `None` for non-OASIS tasks and when no matching assessment
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`QaReviewError::Assessment`] when the assessment fetch
    /// fails.
    pub async fn find_assessment_for(
        &self,
        task: &Task,
    ) -> QaReviewResult<Option<OasisAssessment>> {
        let Some(assessment_type) = oasis_assessment_type(task.task_type()) else {
            return Ok(None);
        };
        let assessments = self.assessments.find_by_episode(task.episode_id()).await?;
        Ok(assessments.into_iter().find(|assessment| {
            assessment.assessment_type() == assessment_type
                && assessment.patient_id() == task.patient_id()
        }))
    }
}

/// Maps an OASIS task type to the assessment milestone it collects.
const fn oasis_assessment_type(task_type: TaskType) -> Option<AssessmentType> {
    match task_type {
        TaskType::OasisStartOfCare => Some(AssessmentType::StartOfCare),
        TaskType::OasisRecertification => Some(AssessmentType::Recertification),
        TaskType::OasisDischarge => Some(AssessmentType::Discharge),
        _ => None,
    }
}
