//! Application services for visit task workflow orchestration.

mod workflow;

pub use workflow::{
    ScheduleTaskRequest, TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService,
};
