//! Domain model for visit note lifecycle management.
//!
//! A visit note documents one visit, one-to-one with its task, and moves
//! through draft, submission, and a QA correction loop. Approved notes are
//! immutable through this core.

mod error;
mod ids;
mod note;
mod status;

pub use error::{ParseVisitNoteStatusError, VisitNoteDomainError};
pub use ids::VisitNoteId;
pub use note::{NewVisitNote, VisitNote, VisitType};
pub use status::{VisitNoteStatus, LEGAL_TRANSITIONS};
