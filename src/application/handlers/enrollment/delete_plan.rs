//! DeletePlanHandler - Command handler for deleting a plan.

use std::sync::Arc;

use crate::application::handlers::sync::save_user_with_retry;
use crate::domain::foundation::{PlanId, UserId};
use crate::domain::plan::PlanError;
use crate::ports::{PlanRepository, UserRepository};

/// Command to delete `plan_id` on behalf of `actor_id`.
#[derive(Debug, Clone)]
pub struct DeletePlanCommand {
    pub actor_id: UserId,
    pub plan_id: PlanId,
}

/// Handler for plan deletion, creator-only.
pub struct DeletePlanHandler {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl DeletePlanHandler {
    pub fn new(users: Arc<dyn UserRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { users, plans }
    }

    /// Deletes the plan and sweeps the user-side enrollment keys.
    ///
    /// The sweep is best-effort: a user that cannot be updated is logged and
    /// skipped, leaving a dangling key that the unenroll path tolerates.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not resolve
    /// - `Forbidden` if the actor is not the creator
    pub async fn handle(&self, cmd: DeletePlanCommand) -> Result<(), PlanError> {
        let plan = self
            .plans
            .find_by_id(&cmd.plan_id)
            .await?
            .ok_or_else(|| PlanError::not_found(cmd.plan_id))?;
        plan.authorize_creator(&cmd.actor_id)?;

        let enrolled: Vec<UserId> = plan.enrolled_user_ids().iter().cloned().collect();
        self.plans.delete(&cmd.plan_id).await?;
        tracing::info!(plan_id = %cmd.plan_id, enrolled = enrolled.len(), "plan deleted");

        for user_id in enrolled {
            let result = save_user_with_retry(self.users.as_ref(), &user_id, |u| {
                u.withdraw_from(&cmd.plan_id);
                Ok(())
            })
            .await;
            if let Err(e) = result {
                tracing::warn!(
                    user_id = %user_id,
                    plan_id = %cmd.plan_id,
                    error = %e,
                    "failed to strip enrollment key after plan deletion"
                );
            }
        }

        Ok(())
    }
}
