//! Visit task lifecycle management.
//!
//! A task is a scheduled clinical visit (or administrative action) tied to
//! a patient and episode of care. It moves from scheduling through
//! execution and completion into an independent QA approval loop, with
//! reschedule and cancel side paths and system-derived missed detection.
//! The module follows hexagonal architecture:
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
