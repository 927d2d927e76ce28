//! Date policy: overdue and due-today predicates.
//!
//! Pure functions over a scheduled calendar date, a task status, and the
//! current instant. Comparison is by calendar day (time of day ignored);
//! both predicates are status-gated so finished work is never flagged.

use super::TaskStatus;
use chrono::{DateTime, NaiveDate, Utc};

/// Returns whether a task is overdue: its scheduled date has passed while
/// the task is still awaiting execution.
///
/// A completed, approved, cancelled, missed, or no-show task is never
/// overdue regardless of its scheduled date.
#[must_use]
pub fn is_overdue(scheduled_date: NaiveDate, status: TaskStatus, now: DateTime<Utc>) -> bool {
    matches!(status, TaskStatus::Scheduled | TaskStatus::InProgress)
        && scheduled_date < now.date_naive()
}

/// Returns whether a task is due today: scheduled for the current calendar
/// day and not yet started.
#[must_use]
pub fn is_due_today(scheduled_date: NaiveDate, status: TaskStatus, now: DateTime<Utc>) -> bool {
    status == TaskStatus::Scheduled && scheduled_date == now.date_naive()
}
