//! Enrollment engine and plan lifecycle.
//!
//! Enrollment mirrors the follow edge across two aggregates: the plan's
//! enrolled set and the user's enrolled-plans set. The plan side commits
//! first; a failure on the user side is surfaced as a retryable partial
//! failure. Plan create/update/delete live here too since they gate on the
//! same creator authorization.

mod create_plan;
mod delete_plan;
mod enroll_in_plan;
mod unenroll_from_plan;
mod update_plan;

pub use create_plan::{CreatePlanCommand, CreatePlanHandler, TopicDraft};
pub use delete_plan::{DeletePlanCommand, DeletePlanHandler};
pub use enroll_in_plan::{EnrollInPlanCommand, EnrollInPlanHandler};
pub use unenroll_from_plan::{UnenrollFromPlanCommand, UnenrollFromPlanHandler};
pub use update_plan::{UpdatePlanCommand, UpdatePlanHandler};
