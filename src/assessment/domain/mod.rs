//! Domain model for OASIS assessment lifecycle management.
//!
//! Assessments are drafted with autosave, submitted only when the
//! instrument is complete, reviewed by QA, and locked once approved.

mod assessment;
mod error;
mod ids;
mod status;

pub use assessment::{AssessmentType, CompletionPercentage, NewAssessment, OasisAssessment};
pub use error::{AssessmentDomainError, ParseAssessmentStatusError};
pub use ids::AssessmentId;
pub use status::{AssessmentStatus, LEGAL_TRANSITIONS};
