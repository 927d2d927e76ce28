//! Unit and orchestration tests for the assessment context.

mod domain_tests;
mod status_tests;

use crate::assessment::domain::{AssessmentType, NewAssessment};
use crate::review::domain::{EpisodeId, PatientId};
use chrono::NaiveDate;

/// Baseline start-of-care assessment data dated 2024-01-10.
pub(crate) fn new_assessment_data() -> NewAssessment {
    NewAssessment {
        patient_id: PatientId::new(),
        episode_id: EpisodeId::new(),
        assessment_type: AssessmentType::StartOfCare,
        assessment_date: NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
    }
}
