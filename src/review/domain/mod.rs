//! Shared domain contract for reviewable clinical work.
//!
//! Tasks, OASIS assessments, and visit notes each carry the same
//! submission/review audit block and implement the [`Reviewable`]
//! capability independently; there is deliberately no inheritance-style
//! base entity.

mod error;
mod ids;
mod meta;

pub use error::ReviewError;
pub use ids::{EpisodeId, PatientId, UserId};
pub use meta::{Reviewable, ReviewDecision, ReviewMeta, ReviewRecord};
