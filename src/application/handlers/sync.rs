//! Convergent-retry saves.
//!
//! Every aggregate write in the application layer is a read-modify-write:
//! reload the aggregate, apply a convergent mutation, compare-and-swap save.
//! A version conflict means another request committed in between; the
//! mutation is reapplied to the fresh copy and the save retried, bounded by
//! [`MAX_SAVE_ATTEMPTS`]. This is what makes the two-write edge protocol
//! safe under concurrent writers: edges are merged into the latest state
//! instead of overwritten last-write-wins.
//!
//! On exhaustion the caller receives a `ConcurrencyConflict`. For the second
//! write of a two-aggregate operation that surfaces as a visible partial
//! failure; the whole operation is convergent and safe to retry.

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, UserId};
use crate::domain::plan::LearningPlan;
use crate::domain::user::User;
use crate::ports::{PlanRepository, UserRepository};

/// Bound on compare-and-swap retries per aggregate write.
pub(crate) const MAX_SAVE_ATTEMPTS: u32 = 3;

/// Reload-apply-save a User until the save commits or retries run out.
///
/// # Errors
///
/// - `UserNotFound` if the user vanishes between attempts
/// - `ConcurrencyConflict` after [`MAX_SAVE_ATTEMPTS`] conflicting saves
/// - whatever `apply` or the store returns otherwise
pub(crate) async fn save_user_with_retry<F>(
    repo: &dyn UserRepository,
    id: &UserId,
    mut apply: F,
) -> Result<User, DomainError>
where
    F: FnMut(&mut User) -> Result<(), DomainError>,
{
    let mut attempts = 0;
    loop {
        let mut user = repo.find_by_id(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
        })?;
        apply(&mut user)?;

        match repo.save(&user).await {
            Ok(()) => {
                user.bump_version();
                return Ok(user);
            }
            Err(e) if e.is_conflict() => {
                attempts += 1;
                if attempts >= MAX_SAVE_ATTEMPTS {
                    return Err(e);
                }
                tracing::debug!(user_id = %id, attempt = attempts, "save conflict, reloading");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Reload-apply-save a LearningPlan until the save commits or retries run out.
///
/// Same contract as [`save_user_with_retry`], with `PlanNotFound` when the
/// plan vanishes between attempts.
pub(crate) async fn save_plan_with_retry<F>(
    repo: &dyn PlanRepository,
    id: &PlanId,
    mut apply: F,
) -> Result<LearningPlan, DomainError>
where
    F: FnMut(&mut LearningPlan) -> Result<(), DomainError>,
{
    let mut attempts = 0;
    loop {
        let mut plan = repo.find_by_id(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::PlanNotFound, format!("Plan not found: {}", id))
        })?;
        apply(&mut plan)?;

        match repo.save(&plan).await {
            Ok(()) => {
                plan.bump_version();
                return Ok(plan);
            }
            Err(e) if e.is_conflict() => {
                attempts += 1;
                if attempts >= MAX_SAVE_ATTEMPTS {
                    return Err(e);
                }
                tracing::debug!(plan_id = %id, attempt = attempts, "save conflict, reloading");
            }
            Err(e) => return Err(e),
        }
    }
}
