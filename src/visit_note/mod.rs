//! Visit note lifecycle management.
//!
//! A visit note is the clinical documentation of a single visit, linked
//! one-to-one with its task. Notes are drafted, submitted for QA review,
//! and either approved (terminal) or returned for correction and
//! resubmitted. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
