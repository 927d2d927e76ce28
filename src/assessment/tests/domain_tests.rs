//! Unit tests for the assessment aggregate's lifecycle transitions.

use crate::assessment::domain::{
    AssessmentDomainError, AssessmentStatus, CompletionPercentage, OasisAssessment,
};
use crate::assessment::tests::new_assessment_data;
use crate::review::domain::{ReviewDecision, ReviewError, Reviewable, UserId};
use crate::testing::FixedClock;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn clock() -> FixedClock {
    FixedClock::at_noon(2024, 1, 10)
}

#[fixture]
fn assessment(clock: FixedClock) -> OasisAssessment {
    OasisAssessment::open(new_assessment_data(), &clock)
}

/// Draft filled to 100% and ready to submit.
#[fixture]
fn complete_draft(mut assessment: OasisAssessment, clock: FixedClock) -> OasisAssessment {
    assessment
        .auto_save(
            json!({"M0100": "01", "M1800": "0"}),
            CompletionPercentage::COMPLETE,
            &clock,
        )
        .expect("auto save");
    assessment
}

#[rstest]
#[case(0, true)]
#[case(100, true)]
#[case(101, false)]
#[case(255, false)]
fn completion_percentage_validates_range(#[case] value: u8, #[case] ok: bool) {
    assert_eq!(CompletionPercentage::new(value).is_ok(), ok);
}

#[rstest]
fn open_produces_an_empty_draft(assessment: OasisAssessment) {
    assert_eq!(assessment.status(), AssessmentStatus::Draft);
    assert_eq!(assessment.completion(), CompletionPercentage::EMPTY);
    assert!(assessment.last_auto_saved().is_none());
    assert!(assessment.review_history().is_empty());
    assert!(!assessment.is_pending_review());
}

#[rstest]
fn auto_save_updates_instrument_and_progress(mut assessment: OasisAssessment, clock: FixedClock) {
    let halfway = CompletionPercentage::new(50).expect("valid percentage");
    assessment
        .auto_save(json!({"M0100": "01"}), halfway, &clock)
        .expect("auto save");

    assert_eq!(assessment.completion(), halfway);
    assert_eq!(assessment.clinical_data(), &json!({"M0100": "01"}));
    assert_eq!(assessment.last_auto_saved(), Some(clock.0));
    assert_eq!(assessment.status(), AssessmentStatus::Draft);
}

#[rstest]
fn auto_save_after_submission_is_refused(mut complete_draft: OasisAssessment, clock: FixedClock) {
    complete_draft.submit(UserId::new(), &clock).expect("submit");

    let err = complete_draft
        .auto_save(json!({}), CompletionPercentage::EMPTY, &clock)
        .expect_err("stale-client autosave must fail");

    assert!(matches!(err, AssessmentDomainError::InvalidTransition { .. }));
    // The submitted instrument is untouched.
    assert!(complete_draft.completion().is_complete());
}

#[rstest]
fn submit_requires_a_complete_instrument(mut assessment: OasisAssessment, clock: FixedClock) {
    let partial = CompletionPercentage::new(85).expect("valid percentage");
    assessment
        .auto_save(json!({"M0100": "01"}), partial, &clock)
        .expect("auto save");

    let err = assessment
        .submit(UserId::new(), &clock)
        .expect_err("partial submission must fail");

    assert_eq!(
        err,
        AssessmentDomainError::IncompleteSubmission {
            id: assessment.id(),
            completion: 85,
        }
    );
    assert_eq!(assessment.status(), AssessmentStatus::Draft);
}

#[rstest]
fn submit_enters_the_review_queue(mut complete_draft: OasisAssessment, clock: FixedClock) {
    let clinician = UserId::new();
    complete_draft.submit(clinician, &clock).expect("submit");

    assert_eq!(complete_draft.status(), AssessmentStatus::Submitted);
    assert!(complete_draft.is_pending_review());
    assert_eq!(complete_draft.review_meta().submitted_by(), Some(clinician));
}

#[rstest]
fn approval_is_recorded_in_history(mut complete_draft: OasisAssessment, clock: FixedClock) {
    let reviewer = UserId::new();
    complete_draft.submit(UserId::new(), &clock).expect("submit");
    complete_draft
        .review(ReviewDecision::Approve, reviewer, None, &clock)
        .expect("approve");

    assert_eq!(complete_draft.status(), AssessmentStatus::Approved);
    let record = complete_draft.review_history().last().expect("one record");
    assert_eq!(record.decision, ReviewDecision::Approve);
    assert_eq!(record.reviewed_by, reviewer);
}

#[rstest]
#[case(None)]
#[case(Some("   "))]
fn rejection_requires_comments(
    mut complete_draft: OasisAssessment,
    clock: FixedClock,
    #[case] comments: Option<&str>,
) {
    complete_draft.submit(UserId::new(), &clock).expect("submit");

    let err = complete_draft
        .review(
            ReviewDecision::Return,
            UserId::new(),
            comments.map(str::to_owned),
            &clock,
        )
        .expect_err("return without comments must fail");

    assert_eq!(err, AssessmentDomainError::Review(ReviewError::EmptyComments));
    assert_eq!(complete_draft.status(), AssessmentStatus::Submitted);
    assert!(complete_draft.review_history().is_empty());
}

#[rstest]
fn review_before_submission_is_refused(mut assessment: OasisAssessment, clock: FixedClock) {
    let err = assessment
        .review(ReviewDecision::Approve, UserId::new(), None, &clock)
        .expect_err("draft review must fail");

    assert!(matches!(err, AssessmentDomainError::InvalidTransition { .. }));
}

#[rstest]
fn rejection_loop_retains_the_full_history(mut complete_draft: OasisAssessment) {
    let clinician = UserId::new();
    let reviewer = UserId::new();

    let day_one = FixedClock::at_noon(2024, 1, 10);
    complete_draft.submit(clinician, &day_one).expect("submit");
    complete_draft
        .review(
            ReviewDecision::Return,
            reviewer,
            Some("M1800 inconsistent with narrative".to_owned()),
            &day_one,
        )
        .expect("reject");
    assert_eq!(complete_draft.status(), AssessmentStatus::Rejected);

    complete_draft.back_to_draft(&day_one).expect("reopen");
    assert_eq!(complete_draft.status(), AssessmentStatus::Draft);
    // Live reviewer fields clear on reopen; the history does not.
    assert!(complete_draft.review_meta().reviewed_by().is_none());
    assert_eq!(complete_draft.review_history().len(), 1);

    let day_two = FixedClock::at_noon(2024, 1, 11);
    complete_draft
        .auto_save(
            json!({"M0100": "01", "M1800": "1"}),
            crate::assessment::domain::CompletionPercentage::COMPLETE,
            &day_two,
        )
        .expect("correct the instrument");
    complete_draft.submit(clinician, &day_two).expect("resubmit");
    complete_draft
        .review(ReviewDecision::Approve, reviewer, None, &day_two)
        .expect("approve resubmission");

    assert_eq!(complete_draft.status(), AssessmentStatus::Approved);
    assert_eq!(complete_draft.review_history().len(), 2);
}

#[rstest]
fn lock_is_only_legal_from_approved(mut complete_draft: OasisAssessment, clock: FixedClock) {
    let err = complete_draft
        .lock(&clock)
        .expect_err("locking a draft must fail");
    assert!(matches!(err, AssessmentDomainError::InvalidTransition { .. }));

    complete_draft.submit(UserId::new(), &clock).expect("submit");
    complete_draft
        .review(ReviewDecision::Approve, UserId::new(), None, &clock)
        .expect("approve");
    complete_draft.lock(&clock).expect("lock approved assessment");

    assert_eq!(complete_draft.status(), AssessmentStatus::Locked);
    assert_eq!(complete_draft.locked_at(), Some(clock.0));
    assert!(complete_draft.status().is_terminal());
}
