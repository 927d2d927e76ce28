//! Unit tests for the permission gate.

use super::{sufficient_roles, Actor, EntityKind, PermissionDenied, PermissionPolicy};
use super::{Role, WorkflowAction};
use crate::review::domain::UserId;
use rstest::rstest;

fn actor_with(roles: &[Role]) -> Actor {
    Actor::new(UserId::new(), roles.iter().copied())
}

#[rstest]
#[case(WorkflowAction::Approve)]
#[case(WorkflowAction::Return)]
#[case(WorkflowAction::Lock)]
fn review_actions_require_a_review_role(#[case] action: WorkflowAction) {
    let roles = sufficient_roles(action);
    assert!(roles.contains(&Role::QaNurse));
    assert!(roles.contains(&Role::ClinicalManager));
    assert!(roles.contains(&Role::OrgAdmin));
    assert!(roles.contains(&Role::SystemAdmin));
    assert!(!roles.contains(&Role::FieldClinician));
    assert!(!roles.contains(&Role::Scheduler));
}

#[rstest]
fn field_clinician_may_complete_but_not_approve() {
    let policy = PermissionPolicy::new();
    let clinician = actor_with(&[Role::FieldClinician]);

    assert!(policy
        .authorize(&clinician, WorkflowAction::Complete, EntityKind::Task)
        .is_ok());

    let denied = policy
        .authorize(&clinician, WorkflowAction::Approve, EntityKind::Task)
        .unwrap_err();
    assert_eq!(
        denied,
        PermissionDenied {
            actor: clinician.id(),
            action: WorkflowAction::Approve,
            kind: EntityKind::Task,
        }
    );
}

#[rstest]
fn actor_without_roles_is_denied_every_action() {
    let policy = PermissionPolicy::new();
    let nobody = actor_with(&[]);

    let actions = [
        WorkflowAction::Create,
        WorkflowAction::Update,
        WorkflowAction::Delete,
        WorkflowAction::Start,
        WorkflowAction::Complete,
        WorkflowAction::Cancel,
        WorkflowAction::Reschedule,
        WorkflowAction::SubmitForReview,
        WorkflowAction::Approve,
        WorkflowAction::Return,
        WorkflowAction::Lock,
    ];
    for action in actions {
        assert!(
            policy
                .authorize(&nobody, action, EntityKind::VisitNote)
                .is_err(),
            "expected denial for {action}"
        );
    }
}

#[rstest]
fn system_admin_is_sufficient_everywhere() {
    let policy = PermissionPolicy::new();
    let admin = actor_with(&[Role::SystemAdmin]);

    let actions = [
        WorkflowAction::Create,
        WorkflowAction::Delete,
        WorkflowAction::Cancel,
        WorkflowAction::Approve,
        WorkflowAction::Lock,
    ];
    for action in actions {
        assert!(
            policy
                .authorize(&admin, action, EntityKind::Assessment)
                .is_ok(),
            "expected grant for {action}"
        );
    }
}

#[rstest]
fn scheduler_may_reschedule_but_not_submit() {
    let policy = PermissionPolicy::new();
    let scheduler = actor_with(&[Role::Scheduler]);

    assert!(policy
        .authorize(&scheduler, WorkflowAction::Reschedule, EntityKind::Task)
        .is_ok());
    assert!(policy
        .authorize(&scheduler, WorkflowAction::SubmitForReview, EntityKind::Task)
        .is_err());
}
