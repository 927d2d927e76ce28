//! Nightingale: clinical task lifecycle and QA review workflow core.
//!
//! This crate implements the workflow heart of a home-health administration
//! system: scheduling and executing clinical visit tasks, drafting and
//! submitting OASIS assessments and visit notes, and running each through
//! an independent quality-assurance approval loop.
//!
//! # Architecture
//!
//! Nightingale follows hexagonal architecture principles:
//!
//! - **Domain**: Pure workflow logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and external services
//! - **Adapters**: Concrete implementations of ports (in-memory today)
//!
//! # Modules
//!
//! - [`access`]: Role-based permission gate for workflow actions
//! - [`review`]: Shared reviewable-entity contract and the unified QA
//!   review coordinator
//! - [`task`]: Visit task scheduling, execution, and QA lifecycle
//! - [`assessment`]: OASIS assessment draft/submit/review/lock lifecycle
//! - [`visit_note`]: Visit note documentation and correction loop

pub mod access;
pub mod assessment;
pub mod review;
pub mod task;
pub mod visit_note;

#[cfg(test)]
pub(crate) mod testing;
