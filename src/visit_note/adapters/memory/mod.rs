//! In-memory adapter implementations for visit note ports.

mod note;

pub use note::InMemoryVisitNoteRepository;
