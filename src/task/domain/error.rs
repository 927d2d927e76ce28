//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::review::domain::ReviewError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by task aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The requested transition is not legal from the current status.
    #[error("task {id}: illegal transition {from} -> {to}")]
    InvalidTransition {
        /// Task whose transition was refused.
        id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the operation attempted to enter.
        to: TaskStatus,
    },

    /// A cancellation was attempted without a reason.
    #[error("cancellation reason must not be empty")]
    EmptyCancellationReason,

    /// A reschedule was attempted without a reason.
    #[error("reschedule reason must not be empty")]
    EmptyRescheduleReason,

    /// A missed marking was attempted before the scheduled date passed.
    #[error("task {id} scheduled for {scheduled_date} cannot be missed yet")]
    NotYetMissed {
        /// Task that was to be marked missed.
        id: TaskId,
        /// Scheduled date that has not yet passed.
        scheduled_date: NaiveDate,
    },

    /// The review audit trail rejected the operation.
    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
