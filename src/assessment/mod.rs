//! OASIS assessment lifecycle management.
//!
//! An OASIS assessment is a structured clinical data-collection instrument
//! completed at care milestones. Drafts autosave freely; submission
//! requires a complete instrument; QA approves or rejects; approved
//! assessments lock irreversibly. The module follows hexagonal
//! architecture:
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
