//! UnenrollFromPlanHandler - Command handler for withdrawing from a plan.

use std::sync::Arc;

use crate::application::handlers::sync::{save_plan_with_retry, save_user_with_retry};
use crate::domain::foundation::{ErrorCode, PlanId, UserId};
use crate::domain::plan::PlanError;
use crate::ports::{PlanRepository, UserRepository};

/// Command to withdraw `user_id` from `plan_id`.
#[derive(Debug, Clone)]
pub struct UnenrollFromPlanCommand {
    pub user_id: UserId,
    pub plan_id: PlanId,
}

/// Handler for the unenroll operation.
pub struct UnenrollFromPlanHandler {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl UnenrollFromPlanHandler {
    pub fn new(users: Arc<dyn UserRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { users, plans }
    }

    /// Removes the enrollment edge from both aggregates, plan side first.
    ///
    /// Withdrawing while not enrolled is a successful no-op. When the plan
    /// has since been deleted the user-side key is still stripped so stale
    /// references do not linger.
    ///
    /// # Errors
    ///
    /// - `Infrastructure` if the user does not resolve
    /// - `EdgeSyncFailed` if the user-side write cannot commit
    pub async fn handle(&self, cmd: UnenrollFromPlanCommand) -> Result<(), PlanError> {
        self.users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| PlanError::infrastructure(format!("User not found: {}", cmd.user_id)))?;

        // First write: the plan's enrolled set. A vanished plan leaves only
        // the user-side cleanup.
        match save_plan_with_retry(self.plans.as_ref(), &cmd.plan_id, |p| {
            p.remove_enrollment(&cmd.user_id);
            Ok(())
        })
        .await
        {
            Ok(_) => {}
            Err(e) if e.code == ErrorCode::PlanNotFound => {
                tracing::debug!(plan_id = %cmd.plan_id, "unenroll target plan no longer exists");
            }
            Err(e) => return Err(e.into()),
        }

        // Second write: the user's enrolled-plans set.
        save_user_with_retry(self.users.as_ref(), &cmd.user_id, |u| {
            u.withdraw_from(&cmd.plan_id);
            Ok(())
        })
        .await
        .map_err(|e| {
            tracing::warn!(
                user_id = %cmd.user_id,
                plan_id = %cmd.plan_id,
                error = %e,
                "user-side withdrawal write failed after plan-side commit"
            );
            PlanError::edge_sync_failed(format!(
                "plan withdrawal recorded but user-side write failed: {}",
                e
            ))
        })?;

        Ok(())
    }
}
