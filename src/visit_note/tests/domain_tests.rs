//! Unit tests for the visit note aggregate's lifecycle transitions.

use crate::review::domain::{ReviewDecision, ReviewError, Reviewable, UserId};
use crate::task::domain::TaskId;
use crate::testing::FixedClock;
use crate::visit_note::domain::{VisitNote, VisitNoteDomainError, VisitNoteStatus};
use crate::visit_note::tests::new_note_data;
use chrono::{NaiveDate, NaiveTime};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn clock() -> FixedClock {
    FixedClock::at_noon(2024, 1, 10)
}

#[fixture]
fn note(clock: FixedClock) -> VisitNote {
    VisitNote::open(new_note_data(), &clock)
}

/// Draft with task link, visit date, and narrative, ready to submit.
#[fixture]
fn documented_note(mut note: VisitNote, clock: FixedClock) -> VisitNote {
    note.link_task(TaskId::new(), &clock).expect("link task");
    note.set_visit_window(
        NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
        NaiveTime::from_hms_opt(9, 0, 0),
        NaiveTime::from_hms_opt(9, 45, 0),
        &clock,
    )
    .expect("set window");
    note.update_narrative(json!({"vitals": {"bp": "128/82"}}), &clock)
        .expect("narrative");
    note
}

#[rstest]
fn open_produces_an_editable_draft(note: VisitNote) {
    assert_eq!(note.status(), VisitNoteStatus::Draft);
    assert!(note.is_editable());
    assert!(note.task_id().is_none());
    assert!(note.visit_date().is_none());
    assert!(note.review_history().is_empty());
}

#[rstest]
fn task_link_is_immutable_once_set(mut note: VisitNote, clock: FixedClock) {
    let task = TaskId::new();
    note.link_task(task, &clock).expect("first link");

    let err = note
        .link_task(TaskId::new(), &clock)
        .expect_err("second link must fail");

    assert_eq!(err, VisitNoteDomainError::TaskAlreadyLinked(note.id()));
    assert_eq!(note.task_id(), Some(task));
}

#[rstest]
fn visit_duration_is_derived_from_the_window(documented_note: VisitNote) {
    assert_eq!(documented_note.visit_duration_minutes(), Some(45));
}

#[rstest]
fn duration_is_unknown_without_both_times(mut note: VisitNote, clock: FixedClock) {
    note.set_visit_window(
        NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
        NaiveTime::from_hms_opt(9, 0, 0),
        None,
        &clock,
    )
    .expect("set window");

    assert!(note.visit_duration_minutes().is_none());
}

#[rstest]
fn submit_requires_a_task_link(mut note: VisitNote, clock: FixedClock) {
    note.set_visit_window(
        NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
        None,
        None,
        &clock,
    )
    .expect("set window");

    let err = note
        .submit(UserId::new(), &clock)
        .expect_err("unlinked submission must fail");

    assert_eq!(err, VisitNoteDomainError::MissingTaskLink(note.id()));
    assert_eq!(note.status(), VisitNoteStatus::Draft);
}

#[rstest]
fn submit_requires_a_visit_date(mut note: VisitNote, clock: FixedClock) {
    note.link_task(TaskId::new(), &clock).expect("link task");

    let err = note
        .submit(UserId::new(), &clock)
        .expect_err("undated submission must fail");

    assert_eq!(err, VisitNoteDomainError::MissingVisitDate(note.id()));
}

#[rstest]
fn submit_enters_the_review_queue(mut documented_note: VisitNote, clock: FixedClock) {
    let clinician = UserId::new();
    documented_note.submit(clinician, &clock).expect("submit");

    assert_eq!(documented_note.status(), VisitNoteStatus::Submitted);
    assert!(documented_note.is_pending_review());
    assert!(!documented_note.is_editable());
    assert_eq!(documented_note.review_meta().submitted_by(), Some(clinician));
}

#[rstest]
fn submitted_note_rejects_edits(mut documented_note: VisitNote, clock: FixedClock) {
    documented_note.submit(UserId::new(), &clock).expect("submit");

    let err = documented_note
        .update_narrative(json!({}), &clock)
        .expect_err("editing a submitted note must fail");

    assert_eq!(
        err,
        VisitNoteDomainError::NotEditable {
            id: documented_note.id(),
            status: VisitNoteStatus::Submitted,
        }
    );
}

#[rstest]
fn approve_ends_the_lifecycle(mut documented_note: VisitNote, clock: FixedClock) {
    let reviewer = UserId::new();
    documented_note.submit(UserId::new(), &clock).expect("submit");
    documented_note
        .approve(reviewer, Some("complete and consistent".to_owned()), &clock)
        .expect("approve");

    assert_eq!(documented_note.status(), VisitNoteStatus::Approved);
    assert!(documented_note.status().is_terminal());
    assert!(!documented_note.is_editable());
    let record = documented_note.review_history().last().expect("one record");
    assert_eq!(record.decision, ReviewDecision::Approve);
    assert_eq!(record.reviewed_by, reviewer);
}

#[rstest]
fn return_requires_comments(mut documented_note: VisitNote, clock: FixedClock) {
    documented_note.submit(UserId::new(), &clock).expect("submit");

    let err = documented_note
        .return_for_correction(UserId::new(), "  ", &clock)
        .expect_err("blank comments must fail");

    assert_eq!(err, VisitNoteDomainError::Review(ReviewError::EmptyComments));
    assert_eq!(documented_note.status(), VisitNoteStatus::Submitted);
}

#[rstest]
fn returned_note_is_editable_and_resubmits_directly(mut documented_note: VisitNote) {
    let clinician = UserId::new();
    let day_one = FixedClock::at_noon(2024, 1, 10);
    documented_note.submit(clinician, &day_one).expect("submit");
    documented_note
        .return_for_correction(UserId::new(), "narrative lacks wound measurements", &day_one)
        .expect("return");

    assert_eq!(documented_note.status(), VisitNoteStatus::Returned);
    assert!(documented_note.is_editable());

    let day_two = FixedClock::at_noon(2024, 1, 11);
    documented_note
        .update_narrative(json!({"wound": "2cm x 1cm"}), &day_two)
        .expect("edit while returned");
    // Returned notes resubmit without passing through draft first.
    documented_note.submit(clinician, &day_two).expect("resubmit");

    assert_eq!(documented_note.status(), VisitNoteStatus::Submitted);
    assert_eq!(documented_note.review_history().len(), 1);
    assert!(documented_note.review_meta().reviewed_by().is_none());
}

#[rstest]
fn returned_note_can_also_park_in_draft(mut documented_note: VisitNote, clock: FixedClock) {
    documented_note.submit(UserId::new(), &clock).expect("submit");
    documented_note
        .return_for_correction(UserId::new(), "incomplete", &clock)
        .expect("return");

    documented_note.back_to_draft(&clock).expect("back to draft");

    assert_eq!(documented_note.status(), VisitNoteStatus::Draft);
    assert!(documented_note.review_meta().reviewed_by().is_none());
    assert_eq!(documented_note.review_history().len(), 1);
}

#[rstest]
fn approved_note_cannot_be_returned(mut documented_note: VisitNote, clock: FixedClock) {
    documented_note.submit(UserId::new(), &clock).expect("submit");
    documented_note.approve(UserId::new(), None, &clock).expect("approve");

    let err = documented_note
        .return_for_correction(UserId::new(), "too late", &clock)
        .expect_err("returning an approved note must fail");

    assert!(matches!(err, VisitNoteDomainError::InvalidTransition { .. }));
}
