//! EnrollInPlanHandler - Command handler for enrolling a user in a plan.

use std::sync::Arc;

use crate::application::handlers::sync::{save_plan_with_retry, save_user_with_retry};
use crate::domain::foundation::{PlanId, UserId};
use crate::domain::plan::{LearningPlan, PlanError};
use crate::ports::{PlanRepository, UserRepository};

/// Command to enroll `user_id` in `plan_id`.
#[derive(Debug, Clone)]
pub struct EnrollInPlanCommand {
    pub user_id: UserId,
    pub plan_id: PlanId,
}

/// Handler for the enroll operation.
pub struct EnrollInPlanHandler {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl EnrollInPlanHandler {
    pub fn new(users: Arc<dyn UserRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { users, plans }
    }

    /// Records the enrollment edge on both aggregates, plan side first.
    ///
    /// Enrolling while already enrolled is a successful no-op. The creator
    /// may enroll in their own plan.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not resolve
    /// - `Infrastructure` if the user does not resolve
    /// - `EdgeSyncFailed` if the user-side write cannot commit; the plan-side
    ///   write persists
    pub async fn handle(&self, cmd: EnrollInPlanCommand) -> Result<LearningPlan, PlanError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| PlanError::infrastructure(format!("User not found: {}", cmd.user_id)))?;
        let plan = self
            .plans
            .find_by_id(&cmd.plan_id)
            .await?
            .ok_or_else(|| PlanError::not_found(cmd.plan_id))?;

        if plan.is_enrolled(&cmd.user_id) && user.is_enrolled_in(&cmd.plan_id) {
            return Ok(plan);
        }

        // First write: the plan's enrolled set.
        let plan = save_plan_with_retry(self.plans.as_ref(), &cmd.plan_id, |p| {
            p.add_enrollment(cmd.user_id.clone());
            Ok(())
        })
        .await?;

        // Second write: the user's enrolled-plans set.
        save_user_with_retry(self.users.as_ref(), &cmd.user_id, |u| {
            u.enroll_in(cmd.plan_id);
            Ok(())
        })
        .await
        .map_err(|e| {
            tracing::warn!(
                user_id = %cmd.user_id,
                plan_id = %cmd.plan_id,
                error = %e,
                "user-side enrollment write failed after plan-side commit"
            );
            PlanError::edge_sync_failed(format!(
                "plan enrollment recorded but user-side write failed: {}",
                e
            ))
        })?;

        Ok(plan)
    }
}
