//! Error types for visit note domain validation and parsing.

use super::{VisitNoteId, VisitNoteStatus};
use crate::review::domain::ReviewError;
use thiserror::Error;

/// Errors returned by visit note aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VisitNoteDomainError {
    /// The requested transition is not legal from the current status.
    #[error("visit note {id}: illegal transition {from} -> {to}")]
    InvalidTransition {
        /// Note whose transition was refused.
        id: VisitNoteId,
        /// Status the note currently holds.
        from: VisitNoteStatus,
        /// Status the operation attempted to enter.
        to: VisitNoteStatus,
    },

    /// Submission was attempted without a linked visit task.
    #[error("visit note {0} has no linked task")]
    MissingTaskLink(VisitNoteId),

    /// Submission was attempted without a visit date.
    #[error("visit note {0} has no visit date")]
    MissingVisitDate(VisitNoteId),

    /// An edit was attempted outside an editable status.
    #[error("visit note {id} is not editable in status {status}")]
    NotEditable {
        /// Note that was to be edited.
        id: VisitNoteId,
        /// Status blocking the edit.
        status: VisitNoteStatus,
    },

    /// A task link was attempted when one is already set.
    #[error("visit note {0} is already linked to a task")]
    TaskAlreadyLinked(VisitNoteId),

    /// The review audit trail rejected the operation.
    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// Error returned while parsing visit note statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown visit note status: {0}")]
pub struct ParseVisitNoteStatusError(pub String);
