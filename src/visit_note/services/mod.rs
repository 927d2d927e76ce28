//! Application services for visit note workflow orchestration.

mod workflow;

pub use workflow::{
    OpenVisitNoteRequest, VisitNoteWorkflowError, VisitNoteWorkflowResult,
    VisitNoteWorkflowService,
};
