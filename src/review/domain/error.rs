//! Error types for the shared review contract.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while validating review metadata against the submission
/// audit trail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// A review was attempted on an entity that has never been submitted.
    #[error("entity has not been submitted for review")]
    NotSubmitted,

    /// The review instant precedes the submission instant.
    #[error("review at {reviewed_at} precedes submission at {submitted_at}")]
    ReviewPrecedesSubmission {
        /// Instant at which the entity entered pending review.
        submitted_at: DateTime<Utc>,
        /// Instant at which the review was attempted.
        reviewed_at: DateTime<Utc>,
    },

    /// Reviewer comments are required for this decision but were empty.
    #[error("review comments must not be empty")]
    EmptyComments,
}
