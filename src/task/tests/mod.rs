//! Unit and orchestration tests for the task context.

mod schedule_tests;

use crate::review::domain::{EpisodeId, PatientId, UserId};
use crate::task::domain::{NewTask, TaskPriority, TaskType};
use chrono::NaiveDate;

/// Baseline task data scheduled for 2024-01-10.
pub(crate) fn new_task_data() -> NewTask {
    NewTask {
        patient_id: PatientId::new(),
        episode_id: EpisodeId::new(),
        assigned_to: UserId::new(),
        task_type: TaskType::SkilledNursing,
        priority: TaskPriority::Routine,
        is_urgent: false,
        scheduled_date: NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"),
        scheduled_start_time: None,
        scheduled_end_time: None,
        estimated_duration_minutes: Some(45),
        is_billable: true,
        billing_code: Some("G0299".to_owned()),
    }
}
