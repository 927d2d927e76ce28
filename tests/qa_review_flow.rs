//! End-to-end QA review flow over the in-memory adapters.
//!
//! Exercises the public API the way an agency back office would: a
//! clinician performs and documents a visit, QA returns the note for
//! correction, the clinician resubmits, and QA clears the whole worklist.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use mockable::DefaultClock;
use nightingale::access::{Actor, PermissionPolicy, Role};
use nightingale::assessment::{
    adapters::memory::InMemoryAssessmentRepository,
    domain::{AssessmentStatus, AssessmentType, CompletionPercentage},
    services::{AssessmentWorkflowService, OpenAssessmentRequest},
};
use nightingale::review::domain::{EpisodeId, PatientId, ReviewDecision, UserId};
use nightingale::review::services::{QaReviewCoordinator, ReviewRequest, ReviewTarget};
use nightingale::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskStatus, TaskType},
    services::{ScheduleTaskRequest, TaskWorkflowService},
};
use nightingale::visit_note::{
    adapters::memory::InMemoryVisitNoteRepository,
    domain::{VisitNoteStatus, VisitType},
    services::{OpenVisitNoteRequest, VisitNoteWorkflowService},
};
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;

struct Workflow {
    tasks: TaskWorkflowService<InMemoryTaskRepository, DefaultClock>,
    assessments: AssessmentWorkflowService<InMemoryAssessmentRepository, DefaultClock>,
    notes: VisitNoteWorkflowService<InMemoryVisitNoteRepository, DefaultClock>,
    coordinator: QaReviewCoordinator<
        InMemoryTaskRepository,
        InMemoryAssessmentRepository,
        InMemoryVisitNoteRepository,
        DefaultClock,
    >,
}

fn workflow() -> Workflow {
    let clock = Arc::new(DefaultClock);
    let policy = PermissionPolicy::new();
    let task_store = Arc::new(InMemoryTaskRepository::new());
    let assessment_store = Arc::new(InMemoryAssessmentRepository::new());
    let note_store = Arc::new(InMemoryVisitNoteRepository::new());

    let coordinator = QaReviewCoordinator::new(
        TaskWorkflowService::new(Arc::clone(&task_store), Arc::clone(&clock), policy),
        AssessmentWorkflowService::new(Arc::clone(&assessment_store), Arc::clone(&clock), policy),
        VisitNoteWorkflowService::new(Arc::clone(&note_store), Arc::clone(&clock), policy),
    );
    Workflow {
        tasks: TaskWorkflowService::new(task_store, Arc::clone(&clock), policy),
        assessments: AssessmentWorkflowService::new(
            assessment_store,
            Arc::clone(&clock),
            policy,
        ),
        notes: VisitNoteWorkflowService::new(note_store, clock, policy),
        coordinator,
    }
}

fn visit_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date")
}

#[tokio::test]
async fn visit_documentation_clears_qa_after_one_correction_loop() {
    let flow = workflow();
    let clinician = Actor::new(UserId::new(), [Role::FieldClinician]);
    let qa_nurse = Actor::new(UserId::new(), [Role::QaNurse]);
    let patient_id = PatientId::new();
    let episode_id = EpisodeId::new();

    // The clinician performs the scheduled OASIS visit.
    let task = flow
        .tasks
        .schedule(
            &clinician,
            ScheduleTaskRequest::new(
                patient_id,
                episode_id,
                clinician.id(),
                TaskType::OasisStartOfCare,
                visit_date(),
            )
            .billable("G0299"),
        )
        .await
        .expect("schedule task");
    flow.tasks
        .start(&clinician, task.id())
        .await
        .expect("start task");
    flow.tasks
        .complete(&clinician, task.id(), Some("admission visit done".to_owned()))
        .await
        .expect("complete task");

    // The visit note documents the same visit.
    let note = flow
        .notes
        .open(
            &clinician,
            OpenVisitNoteRequest::new(patient_id, episode_id, VisitType::SkilledNursing)
                .for_task(task.id()),
        )
        .await
        .expect("open note");
    flow.notes
        .set_visit_window(&clinician, note.id(), visit_date(), None, None)
        .await
        .expect("set window");
    flow.notes
        .update_narrative(&clinician, note.id(), json!({"narrative": "admission"}))
        .await
        .expect("narrative");
    flow.notes
        .submit(&clinician, note.id())
        .await
        .expect("submit note");

    // The OASIS instrument is filled and submitted alongside.
    let assessment = flow
        .assessments
        .open(
            &clinician,
            OpenAssessmentRequest::new(
                patient_id,
                episode_id,
                AssessmentType::StartOfCare,
                visit_date(),
            ),
        )
        .await
        .expect("open assessment");
    flow.assessments
        .auto_save(
            &clinician,
            assessment.id(),
            json!({"M0100": "01"}),
            CompletionPercentage::COMPLETE,
        )
        .await
        .expect("auto save");
    flow.assessments
        .submit(&clinician, assessment.id())
        .await
        .expect("submit assessment");

    // Everything lands on one worklist.
    let pending = flow.coordinator.load_pending_reviews().await;
    assert!(pending.warnings.is_empty());
    assert_eq!(pending.items.len(), 3);

    // The OASIS task correlates with its assessment for side-by-side review.
    let correlated = flow
        .coordinator
        .find_assessment_for(&task)
        .await
        .expect("correlation fetch")
        .expect("assessment exists for the episode");
    assert_eq!(correlated.id(), assessment.id());

    // QA returns the note; the clinician corrects and resubmits.
    flow.coordinator
        .submit_review(
            &qa_nurse,
            ReviewRequest {
                target: ReviewTarget::VisitNote(note.id()),
                decision: ReviewDecision::Return,
                comments: Some("wound measurements missing".to_owned()),
            },
        )
        .await
        .expect("return note");
    let returned = flow.notes.get(note.id()).await.expect("returned note");
    assert_eq!(returned.status(), VisitNoteStatus::Returned);
    assert!(returned.is_editable());

    flow.notes
        .update_narrative(
            &clinician,
            note.id(),
            json!({"narrative": "admission", "wound": "2cm x 1cm"}),
        )
        .await
        .expect("correct narrative");
    flow.notes
        .submit(&clinician, note.id())
        .await
        .expect("resubmit note");

    // QA clears the remaining worklist.
    for request in [
        ReviewRequest {
            target: ReviewTarget::Task(task.id()),
            decision: ReviewDecision::Approve,
            comments: None,
        },
        ReviewRequest {
            target: ReviewTarget::Assessment(assessment.id()),
            decision: ReviewDecision::Approve,
            comments: None,
        },
        ReviewRequest {
            target: ReviewTarget::VisitNote(note.id()),
            decision: ReviewDecision::Approve,
            comments: None,
        },
    ] {
        flow.coordinator
            .submit_review(&qa_nurse, request)
            .await
            .expect("approve");
    }

    let cleared = flow.coordinator.load_pending_reviews().await;
    assert!(cleared.items.is_empty());
    assert!(cleared.warnings.is_empty());

    // Approved work is final, and the approved assessment can be locked.
    assert_eq!(
        flow.tasks.get(task.id()).await.expect("task").status(),
        TaskStatus::QaApproved
    );
    assert_eq!(
        flow.notes.get(note.id()).await.expect("note").status(),
        VisitNoteStatus::Approved
    );
    let locked = flow
        .assessments
        .lock(&qa_nurse, assessment.id())
        .await
        .expect("lock assessment");
    assert_eq!(locked.status(), AssessmentStatus::Locked);

    // The note's correction loop is preserved in its history.
    let history = flow.notes.get(note.id()).await.expect("note");
    assert_eq!(history.review_history().len(), 2);
}

#[tokio::test]
async fn scheduling_staff_cannot_clear_the_qa_worklist() {
    let flow = workflow();
    let clinician = Actor::new(UserId::new(), [Role::FieldClinician]);
    let scheduler = Actor::new(UserId::new(), [Role::Scheduler]);

    let task = flow
        .tasks
        .schedule(
            &clinician,
            ScheduleTaskRequest::new(
                PatientId::new(),
                EpisodeId::new(),
                clinician.id(),
                TaskType::SkilledNursing,
                visit_date(),
            ),
        )
        .await
        .expect("schedule task");
    flow.tasks
        .complete(&clinician, task.id(), None)
        .await
        .expect("complete task");

    let result = flow
        .coordinator
        .submit_review(
            &scheduler,
            ReviewRequest {
                target: ReviewTarget::Task(task.id()),
                decision: ReviewDecision::Approve,
                comments: None,
            },
        )
        .await;
    assert!(result.is_err());

    // The task still awaits a qualified reviewer.
    let stored = flow.tasks.get(task.id()).await.expect("task");
    assert_eq!(stored.status(), TaskStatus::CompletedPendingQa);
}
