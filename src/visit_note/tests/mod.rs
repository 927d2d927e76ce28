//! Unit and orchestration tests for the visit note context.

mod domain_tests;
mod status_tests;

use crate::review::domain::{EpisodeId, PatientId};
use crate::visit_note::domain::{NewVisitNote, VisitType};

/// Baseline skilled-nursing note data with no task link yet.
pub(crate) fn new_note_data() -> NewVisitNote {
    NewVisitNote {
        task_id: None,
        patient_id: PatientId::new(),
        episode_id: EpisodeId::new(),
        visit_type: VisitType::SkilledNursing,
    }
}
