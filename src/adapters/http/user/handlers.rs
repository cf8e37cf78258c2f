//! HTTP handlers for user and relationship endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::relationship::{
    FollowUserCommand, FollowUserHandler, ListFollowCandidatesHandler, ListFollowCandidatesQuery,
    UnfollowUserCommand, UnfollowUserHandler,
};
use crate::application::handlers::user::{
    DeleteAccountCommand, DeleteAccountHandler, EnsureUserCommand, EnsureUserHandler,
    GetUserHandler, GetUserQuery, UpdateProfileCommand, UpdateProfileHandler,
};
use crate::domain::foundation::{ErrorCode, UserId};
use crate::domain::user::UserError;

use super::dto::{UpdateProfileRequest, UserResponse, UserSummaryResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct UserHandlers {
    ensure_handler: Arc<EnsureUserHandler>,
    get_handler: Arc<GetUserHandler>,
    update_profile_handler: Arc<UpdateProfileHandler>,
    delete_account_handler: Arc<DeleteAccountHandler>,
    follow_handler: Arc<FollowUserHandler>,
    unfollow_handler: Arc<UnfollowUserHandler>,
    candidates_handler: Arc<ListFollowCandidatesHandler>,
}

impl UserHandlers {
    pub fn new(
        ensure_handler: Arc<EnsureUserHandler>,
        get_handler: Arc<GetUserHandler>,
        update_profile_handler: Arc<UpdateProfileHandler>,
        delete_account_handler: Arc<DeleteAccountHandler>,
        follow_handler: Arc<FollowUserHandler>,
        unfollow_handler: Arc<UnfollowUserHandler>,
        candidates_handler: Arc<ListFollowCandidatesHandler>,
    ) -> Self {
        Self {
            ensure_handler,
            get_handler,
            update_profile_handler,
            delete_account_handler,
            follow_handler,
            unfollow_handler,
            candidates_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/me - Current user, created on first authentication
pub async fn get_me(State(handlers): State<UserHandlers>, RequireAuth(user): RequireAuth) -> Response {
    match handlers
        .ensure_handler
        .handle(EnsureUserCommand { principal: user })
        .await
    {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(&user))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// PUT /api/me - Update the own profile
pub async fn update_me(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Response {
    let cmd = UpdateProfileCommand {
        user_id: user.id,
        name: req.name,
        picture_url: req.picture_url,
    };

    match handlers.update_profile_handler.handle(cmd).await {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(&user))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// DELETE /api/me - Delete the own account
pub async fn delete_me(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .delete_account_handler
        .handle(DeleteAccountCommand { user_id: user.id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/users/:id - Look up a user
pub async fn get_user(
    State(handlers): State<UserHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetUserQuery { user_id }).await {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(&user))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/users/candidates - Users the actor could follow
pub async fn list_follow_candidates(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListFollowCandidatesQuery { actor_id: user.id };

    match handlers.candidates_handler.handle(query).await {
        Ok(users) => {
            let body: Vec<UserSummaryResponse> =
                users.iter().map(UserSummaryResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// POST /api/users/:id/follow - Follow a user
pub async fn follow_user(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let target_id = match parse_user_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let cmd = FollowUserCommand {
        actor_id: user.id,
        target_id,
    };

    match handlers.follow_handler.handle(cmd).await {
        Ok(actor) => (StatusCode::OK, Json(UserResponse::from(&actor))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// DELETE /api/users/:id/follow - Unfollow a user
pub async fn unfollow_user(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let target_id = match parse_user_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let cmd = UnfollowUserCommand {
        actor_id: user.id,
        target_id,
    };

    match handlers.unfollow_handler.handle(cmd).await {
        Ok(actor) => (StatusCode::OK, Json(UserResponse::from(&actor))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, Response> {
    UserId::new(raw).map_err(|e| error_response(ErrorCode::ValidationFailed, e.to_string()))
}

fn handle_user_error(e: UserError) -> Response {
    error_response(e.code(), e.message())
}
