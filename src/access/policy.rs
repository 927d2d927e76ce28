//! Fail-closed permission policy mapping workflow actions to the role sets
//! sufficient to perform them.

use super::{EntityKind, Role, WorkflowAction};
use crate::review::domain::UserId;
use std::collections::HashSet;
use thiserror::Error;

/// Raised when an actor lacks every role sufficient for the attempted
/// action. Checked before any entity state is read or mutated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("actor {actor} may not {action} a {kind}")]
pub struct PermissionDenied {
    /// Actor whose roles were insufficient.
    pub actor: UserId,
    /// Action that was refused.
    pub action: WorkflowAction,
    /// Entity kind the action targeted.
    pub kind: EntityKind,
}

/// An authenticated principal: identity plus the set of roles granted by
/// the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: UserId,
    roles: HashSet<Role>,
}

impl Actor {
    /// Creates an actor with the given roles.
    #[must_use]
    pub fn new(id: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id,
            roles: roles.into_iter().collect(),
        }
    }

    /// Returns the actor's user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns whether the actor holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Roles that may act on clinical documentation they own.
const CLINICAL_ROLES: &[Role] = &[
    Role::FieldClinician,
    Role::ClinicalManager,
    Role::OrgAdmin,
    Role::SystemAdmin,
];

/// Roles that may manage the visit calendar.
const SCHEDULING_ROLES: &[Role] = &[
    Role::FieldClinician,
    Role::Scheduler,
    Role::ClinicalManager,
    Role::OrgAdmin,
    Role::SystemAdmin,
];

/// Roles that may review submitted clinical work.
const REVIEW_ROLES: &[Role] = &[
    Role::QaNurse,
    Role::ClinicalManager,
    Role::OrgAdmin,
    Role::SystemAdmin,
];

/// Roles that may administratively delete records. The workflow core never
/// deletes; the configuration still enumerates the action.
const ADMIN_ROLES: &[Role] = &[Role::OrgAdmin, Role::SystemAdmin];

/// Returns the static set of roles sufficient for `action`.
///
/// The table is deliberately plain data so tests can assert against it
/// directly.
#[must_use]
pub const fn sufficient_roles(action: WorkflowAction) -> &'static [Role] {
    match action {
        WorkflowAction::Create
        | WorkflowAction::Update
        | WorkflowAction::Start
        | WorkflowAction::Complete
        | WorkflowAction::SubmitForReview => CLINICAL_ROLES,
        WorkflowAction::Cancel | WorkflowAction::Reschedule => SCHEDULING_ROLES,
        WorkflowAction::Approve | WorkflowAction::Return | WorkflowAction::Lock => REVIEW_ROLES,
        WorkflowAction::Delete => ADMIN_ROLES,
    }
}

/// Role-based permission gate consulted before every workflow transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionPolicy;

impl PermissionPolicy {
    /// Creates the standard policy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Authorizes `actor` to perform `action` on entities of `kind`,
    /// failing closed when no sufficient role is held.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] when the actor holds none of the roles
    /// sufficient for the action.
    pub fn authorize(
        &self,
        actor: &Actor,
        action: WorkflowAction,
        kind: EntityKind,
    ) -> Result<(), PermissionDenied> {
        if sufficient_roles(action)
            .iter()
            .any(|role| actor.has_role(*role))
        {
            Ok(())
        } else {
            Err(PermissionDenied {
                actor: actor.id(),
                action,
                kind,
            })
        }
    }
}
