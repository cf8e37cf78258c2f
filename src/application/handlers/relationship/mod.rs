//! Relationship engine - the symmetric follow/follower edge.
//!
//! `Follow` and `Unfollow` mutate two User aggregates with two sequential
//! store writes and no cross-aggregate transaction. Both writes go through
//! the convergent-retry save; if the second write still fails, the first
//! write's effect persists and the error tells the caller to retry the
//! whole (idempotent) operation.

mod follow_user;
mod list_follow_candidates;
mod unfollow_user;

pub use follow_user::{FollowUserCommand, FollowUserHandler};
pub use list_follow_candidates::{ListFollowCandidatesHandler, ListFollowCandidatesQuery};
pub use unfollow_user::{UnfollowUserCommand, UnfollowUserHandler};
