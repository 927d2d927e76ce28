//! Shared review contract and unified QA review coordination.
//!
//! QA review is the approval gate requiring a qualified reviewer to
//! approve or return submitted clinical work before it is final. This
//! module holds the audit contract every reviewable entity implements
//! ([`domain`]) and the coordinator that aggregates the three pending
//! worklists and dispatches decisions ([`services`]).

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
