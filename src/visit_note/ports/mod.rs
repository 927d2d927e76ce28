//! Port contracts for visit note lifecycle management.

pub mod repository;

pub use repository::{
    VisitNoteRepository, VisitNoteRepositoryError, VisitNoteRepositoryResult,
};
