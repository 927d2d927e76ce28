//! Application services for assessment workflow orchestration.

mod workflow;

pub use workflow::{
    AssessmentWorkflowError, AssessmentWorkflowResult, AssessmentWorkflowService,
    OpenAssessmentRequest,
};
