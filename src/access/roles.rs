//! Roles, workflow actions, and entity kinds used by the permission gate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Organisational role held by an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Field nurse, therapist, or aide performing visits.
    FieldClinician,
    /// Office staff managing the visit calendar.
    Scheduler,
    /// Nurse responsible for QA review of clinical documentation.
    QaNurse,
    /// Clinical department manager.
    ClinicalManager,
    /// Agency administrator.
    OrgAdmin,
    /// Platform administrator.
    SystemAdmin,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FieldClinician => "field_clinician",
            Self::Scheduler => "scheduler",
            Self::QaNurse => "qa_nurse",
            Self::ClinicalManager => "clinical_manager",
            Self::OrgAdmin => "org_admin",
            Self::SystemAdmin => "system_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow action an actor may attempt against a reviewable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    /// Create a new entity in its initial status.
    Create,
    /// Edit an entity while it is in an editable status.
    Update,
    /// Administratively delete an entity (never performed by this core).
    Delete,
    /// Begin executing a scheduled visit task.
    Start,
    /// Complete a visit task and send it to QA.
    Complete,
    /// Cancel a visit task with a reason.
    Cancel,
    /// Move a visit task to a new scheduled date.
    Reschedule,
    /// Submit an assessment or visit note for QA review.
    SubmitForReview,
    /// Approve submitted work.
    Approve,
    /// Return submitted work for correction.
    Return,
    /// Lock an approved assessment against further change.
    Lock,
}

impl WorkflowAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Reschedule => "reschedule",
            Self::SubmitForReview => "submit_for_review",
            Self::Approve => "approve",
            Self::Return => "return",
            Self::Lock => "lock",
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three reviewable entity kinds the workflow core manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Scheduled clinical visit task.
    Task,
    /// OASIS assessment.
    Assessment,
    /// Visit note documentation.
    VisitNote,
}

impl EntityKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Assessment => "assessment",
            Self::VisitNote => "visit_note",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
