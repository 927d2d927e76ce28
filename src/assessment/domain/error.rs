//! Error types for assessment domain validation and parsing.

use super::{AssessmentId, AssessmentStatus};
use crate::review::domain::ReviewError;
use thiserror::Error;

/// Errors returned by assessment aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssessmentDomainError {
    /// The requested transition is not legal from the current status.
    #[error("assessment {id}: illegal transition {from} -> {to}")]
    InvalidTransition {
        /// Assessment whose transition was refused.
        id: AssessmentId,
        /// Status the assessment currently holds.
        from: AssessmentStatus,
        /// Status the operation attempted to enter.
        to: AssessmentStatus,
    },

    /// Submission was attempted below full completion.
    #[error("assessment {id} is only {completion}% complete; submission requires 100%")]
    IncompleteSubmission {
        /// Assessment that was to be submitted.
        id: AssessmentId,
        /// Completion percentage at submission time.
        completion: u8,
    },

    /// A completion percentage outside 0..=100 was supplied.
    #[error("invalid completion percentage {0}, expected 0..=100")]
    InvalidCompletionPercentage(u8),

    /// The review audit trail rejected the operation.
    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// Error returned while parsing assessment statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown assessment status: {0}")]
pub struct ParseAssessmentStatusError(pub String);
