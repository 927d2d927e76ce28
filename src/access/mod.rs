//! Role/permission gate for workflow actions.
//!
//! Answers "may this actor perform this action on this entity kind?" from
//! a static sufficient-role table, failing closed. Every transition method
//! in the workflow services consults this gate before touching entity
//! state, so a permission failure can never leave a partial mutation.

mod policy;
mod roles;

pub use policy::{sufficient_roles, Actor, PermissionDenied, PermissionPolicy};
pub use roles::{EntityKind, Role, WorkflowAction};

#[cfg(test)]
mod tests;
