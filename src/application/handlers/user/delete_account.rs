//! DeleteAccountHandler - account deletion with edge cascade.

use std::sync::Arc;

use crate::application::handlers::sync::{save_plan_with_retry, save_user_with_retry};
use crate::domain::foundation::UserId;
use crate::domain::user::UserError;
use crate::ports::{PlanRepository, UserRepository};

/// Command to delete the actor's own account.
#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub user_id: UserId,
}

/// Handler for account deletion.
///
/// The user record is removed first, then the edges pointing at it are swept:
/// follower/following sets of connected users and enrolled sets of the user's
/// plans. The sweep is best-effort; dangling references are tolerated by the
/// read and unfollow/unenroll paths.
pub struct DeleteAccountHandler {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl DeleteAccountHandler {
    pub fn new(users: Arc<dyn UserRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { users, plans }
    }

    /// # Errors
    ///
    /// - `NotFound` if the account does not resolve
    pub async fn handle(&self, cmd: DeleteAccountCommand) -> Result<(), UserError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id.clone()))?;

        let followers: Vec<UserId> = user.followers().iter().cloned().collect();
        let following: Vec<UserId> = user.following().iter().cloned().collect();
        let enrolled: Vec<_> = user.enrolled_plans().iter().copied().collect();

        self.users.delete(&cmd.user_id).await?;
        tracing::info!(user_id = %cmd.user_id, "account deleted");

        // Counterparty follow edges.
        for other in followers {
            let result = save_user_with_retry(self.users.as_ref(), &other, |u| {
                u.remove_following(&cmd.user_id);
                Ok(())
            })
            .await;
            if let Err(e) = result {
                tracing::warn!(user_id = %other, error = %e, "failed to strip following edge");
            }
        }
        for other in following {
            let result = save_user_with_retry(self.users.as_ref(), &other, |u| {
                u.remove_follower(&cmd.user_id);
                Ok(())
            })
            .await;
            if let Err(e) = result {
                tracing::warn!(user_id = %other, error = %e, "failed to strip follower edge");
            }
        }

        // Plan-side enrollment keys.
        for plan_id in enrolled {
            let result = save_plan_with_retry(self.plans.as_ref(), &plan_id, |p| {
                p.remove_enrollment(&cmd.user_id);
                Ok(())
            })
            .await;
            if let Err(e) = result {
                tracing::warn!(plan_id = %plan_id, error = %e, "failed to strip enrollment");
            }
        }

        Ok(())
    }
}
