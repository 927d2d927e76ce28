//! Unit tests for the overdue and due-today date policy.

use crate::task::domain::{schedule, Task, TaskStatus};
use crate::task::tests::new_task_data;
use crate::testing::FixedClock;
use chrono::NaiveDate;
use mockable::Clock;
use rstest::rstest;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[rstest]
#[case(TaskStatus::Scheduled, true)]
#[case(TaskStatus::InProgress, true)]
#[case(TaskStatus::CompletedPendingQa, false)]
#[case(TaskStatus::QaApproved, false)]
#[case(TaskStatus::Cancelled, false)]
#[case(TaskStatus::Missed, false)]
#[case(TaskStatus::NoShow, false)]
fn past_date_is_overdue_only_while_awaiting_execution(
    #[case] status: TaskStatus,
    #[case] expected: bool,
) {
    let now = FixedClock::at_noon(2024, 1, 15).utc();
    assert_eq!(schedule::is_overdue(day(2024, 1, 10), status, now), expected);
}

#[rstest]
#[case(day(2024, 1, 15), false)]
#[case(day(2024, 1, 16), false)]
fn current_or_future_date_is_never_overdue(#[case] scheduled: NaiveDate, #[case] expected: bool) {
    let now = FixedClock::at_noon(2024, 1, 15).utc();
    assert_eq!(
        schedule::is_overdue(scheduled, TaskStatus::Scheduled, now),
        expected
    );
}

#[rstest]
fn overdue_compares_calendar_days_not_instants() {
    // Scheduled yesterday; even one second into today counts as overdue.
    let now = day(2024, 1, 11)
        .and_hms_opt(0, 0, 1)
        .expect("valid time")
        .and_utc();
    assert!(schedule::is_overdue(day(2024, 1, 10), TaskStatus::Scheduled, now));
}

#[rstest]
#[case(TaskStatus::Scheduled, true)]
#[case(TaskStatus::InProgress, false)]
#[case(TaskStatus::Cancelled, false)]
fn due_today_requires_scheduled_status(#[case] status: TaskStatus, #[case] expected: bool) {
    let now = FixedClock::at_noon(2024, 1, 10).utc();
    assert_eq!(schedule::is_due_today(day(2024, 1, 10), status, now), expected);
}

#[rstest]
fn due_today_excludes_other_days() {
    let now = FixedClock::at_noon(2024, 1, 10).utc();
    assert!(!schedule::is_due_today(day(2024, 1, 9), TaskStatus::Scheduled, now));
    assert!(!schedule::is_due_today(day(2024, 1, 11), TaskStatus::Scheduled, now));
}

#[rstest]
fn aggregate_exposes_derived_flags_without_storing_them() {
    let clock = FixedClock::at_noon(2024, 1, 10);
    let task = Task::schedule(new_task_data(), &clock);

    assert!(task.is_due_today(clock.utc()));
    assert!(!task.is_overdue(clock.utc()));

    let later = FixedClock::at_noon(2024, 1, 15).utc();
    assert!(task.is_overdue(later));
    assert!(!task.is_due_today(later));
}
