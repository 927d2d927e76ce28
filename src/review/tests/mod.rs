//! Unit and orchestration tests for the review context.
