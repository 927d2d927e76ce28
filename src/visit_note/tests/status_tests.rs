//! Unit tests for visit note status transition validation.

use crate::visit_note::domain::VisitNoteStatus;
use rstest::rstest;

const ALL_STATUSES: [VisitNoteStatus; 4] = [
    VisitNoteStatus::Draft,
    VisitNoteStatus::Submitted,
    VisitNoteStatus::Approved,
    VisitNoteStatus::Returned,
];

#[rstest]
#[case(VisitNoteStatus::Draft, VisitNoteStatus::Submitted, true)]
#[case(VisitNoteStatus::Draft, VisitNoteStatus::Approved, false)]
#[case(VisitNoteStatus::Draft, VisitNoteStatus::Returned, false)]
#[case(VisitNoteStatus::Submitted, VisitNoteStatus::Approved, true)]
#[case(VisitNoteStatus::Submitted, VisitNoteStatus::Returned, true)]
#[case(VisitNoteStatus::Submitted, VisitNoteStatus::Draft, false)]
#[case(VisitNoteStatus::Returned, VisitNoteStatus::Draft, true)]
#[case(VisitNoteStatus::Returned, VisitNoteStatus::Submitted, true)]
#[case(VisitNoteStatus::Returned, VisitNoteStatus::Approved, false)]
fn can_transition_to_returns_expected(
    #[case] from: VisitNoteStatus,
    #[case] to: VisitNoteStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
fn approved_is_the_only_terminal_status() {
    for status in ALL_STATUSES {
        assert_eq!(status.is_terminal(), status == VisitNoteStatus::Approved);
    }
    for target in ALL_STATUSES {
        assert!(!VisitNoteStatus::Approved.can_transition_to(target));
    }
}

#[rstest]
#[case(VisitNoteStatus::Draft, true)]
#[case(VisitNoteStatus::Submitted, false)]
#[case(VisitNoteStatus::Approved, false)]
#[case(VisitNoteStatus::Returned, true)]
fn is_editable_returns_expected(#[case] status: VisitNoteStatus, #[case] expected: bool) {
    assert_eq!(status.is_editable(), expected);
}

#[rstest]
fn status_round_trips_through_storage_representation() {
    for status in ALL_STATUSES {
        let parsed = VisitNoteStatus::try_from(status.as_str()).expect("round trip");
        assert_eq!(parsed, status);
    }
}
