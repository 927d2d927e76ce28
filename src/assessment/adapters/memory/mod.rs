//! In-memory adapter implementations for assessment ports.

mod assessment;

pub use assessment::InMemoryAssessmentRepository;
