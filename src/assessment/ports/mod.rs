//! Port contracts for assessment lifecycle management.

pub mod repository;

pub use repository::{
    AssessmentRepository, AssessmentRepositoryError, AssessmentRepositoryResult,
};
