//! Domain model for visit task lifecycle management.
//!
//! The task domain models scheduling, execution, completion, the QA
//! approval loop, and the reschedule/cancel side paths, keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
pub mod schedule;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::{TaskStatus, LEGAL_TRANSITIONS};
pub use task::{NewTask, RescheduleRecord, Task, TaskPriority, TaskType};
