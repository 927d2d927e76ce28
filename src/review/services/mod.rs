//! Application services for unified QA review.

mod coordinator;

pub use coordinator::{
    FetchWarning, PendingReviews, QaReviewCoordinator, QaReviewError, QaReviewResult,
    ReviewItem, ReviewRequest, ReviewTarget,
};
