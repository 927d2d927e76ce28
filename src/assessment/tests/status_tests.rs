//! Unit tests for assessment status transition validation.

use crate::assessment::domain::AssessmentStatus;
use rstest::rstest;

const ALL_STATUSES: [AssessmentStatus; 5] = [
    AssessmentStatus::Draft,
    AssessmentStatus::Submitted,
    AssessmentStatus::Approved,
    AssessmentStatus::Rejected,
    AssessmentStatus::Locked,
];

#[rstest]
#[case(AssessmentStatus::Draft, AssessmentStatus::Submitted, true)]
#[case(AssessmentStatus::Draft, AssessmentStatus::Approved, false)]
#[case(AssessmentStatus::Draft, AssessmentStatus::Locked, false)]
#[case(AssessmentStatus::Submitted, AssessmentStatus::Approved, true)]
#[case(AssessmentStatus::Submitted, AssessmentStatus::Rejected, true)]
#[case(AssessmentStatus::Submitted, AssessmentStatus::Draft, false)]
#[case(AssessmentStatus::Submitted, AssessmentStatus::Locked, false)]
#[case(AssessmentStatus::Approved, AssessmentStatus::Locked, true)]
#[case(AssessmentStatus::Approved, AssessmentStatus::Draft, false)]
#[case(AssessmentStatus::Rejected, AssessmentStatus::Draft, true)]
#[case(AssessmentStatus::Rejected, AssessmentStatus::Submitted, false)]
fn can_transition_to_returns_expected(
    #[case] from: AssessmentStatus,
    #[case] to: AssessmentStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
fn locked_is_the_only_terminal_status() {
    for status in ALL_STATUSES {
        assert_eq!(status.is_terminal(), status == AssessmentStatus::Locked);
    }
    for target in ALL_STATUSES {
        assert!(!AssessmentStatus::Locked.can_transition_to(target));
    }
}

#[rstest]
fn status_round_trips_through_storage_representation() {
    for status in ALL_STATUSES {
        let parsed = AssessmentStatus::try_from(status.as_str()).expect("round trip");
        assert_eq!(parsed, status);
    }
}
