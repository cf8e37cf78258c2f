//! HTTP handlers for learning plan endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::enrollment::{
    CreatePlanCommand, CreatePlanHandler, DeletePlanCommand, DeletePlanHandler,
    EnrollInPlanCommand, EnrollInPlanHandler, UnenrollFromPlanCommand, UnenrollFromPlanHandler,
    UpdatePlanCommand, UpdatePlanHandler,
};
use crate::application::handlers::progress::{
    AddTopicCommand, AddTopicHandler, RemoveTopicCommand, RemoveTopicHandler,
    SetTopicCompletionCommand, SetTopicCompletionHandler, UpdateTopicCommand, UpdateTopicHandler,
};
use crate::application::handlers::PlanQueries;
use crate::domain::foundation::{PlanId, TopicId};
use crate::domain::plan::PlanError;

use super::dto::{
    AddTopicRequest, CreatePlanRequest, PlanListParams, PlanResponse, SetCompletionRequest,
    TopicRequest, UpdatePlanRequest, UpdateTopicRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PlanHandlers {
    create_handler: Arc<CreatePlanHandler>,
    update_handler: Arc<UpdatePlanHandler>,
    delete_handler: Arc<DeletePlanHandler>,
    enroll_handler: Arc<EnrollInPlanHandler>,
    unenroll_handler: Arc<UnenrollFromPlanHandler>,
    add_topic_handler: Arc<AddTopicHandler>,
    update_topic_handler: Arc<UpdateTopicHandler>,
    remove_topic_handler: Arc<RemoveTopicHandler>,
    set_completion_handler: Arc<SetTopicCompletionHandler>,
    queries: Arc<PlanQueries>,
}

impl PlanHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreatePlanHandler>,
        update_handler: Arc<UpdatePlanHandler>,
        delete_handler: Arc<DeletePlanHandler>,
        enroll_handler: Arc<EnrollInPlanHandler>,
        unenroll_handler: Arc<UnenrollFromPlanHandler>,
        add_topic_handler: Arc<AddTopicHandler>,
        update_topic_handler: Arc<UpdateTopicHandler>,
        remove_topic_handler: Arc<RemoveTopicHandler>,
        set_completion_handler: Arc<SetTopicCompletionHandler>,
        queries: Arc<PlanQueries>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            delete_handler,
            enroll_handler,
            unenroll_handler,
            add_topic_handler,
            update_topic_handler,
            remove_topic_handler,
            set_completion_handler,
            queries,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Plan lifecycle
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/plans - Create a plan
pub async fn create_plan(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreatePlanRequest>,
) -> Response {
    let cmd = CreatePlanCommand {
        creator_id: user.id,
        title: req.title,
        description: req.description,
        category: req.category,
        topics: req.topics.into_iter().map(TopicRequest::into).collect(),
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(plan) => (StatusCode::CREATED, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_plan_error(e),
    }
}

/// GET /api/plans/:id - Single plan
pub async fn get_plan(
    State(handlers): State<PlanHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<Uuid>,
) -> Response {
    match handlers.queries.get_plan(&PlanId::from_uuid(id)).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_plan_error(e),
    }
}

/// PUT /api/plans/:id - Update plan details
pub async fn update_plan(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePlanRequest>,
) -> Response {
    let cmd = UpdatePlanCommand {
        actor_id: user.id,
        plan_id: PlanId::from_uuid(id),
        title: req.title,
        description: req.description,
        category: req.category,
        topics: req
            .topics
            .map(|topics| topics.into_iter().map(TopicRequest::into).collect()),
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_plan_error(e),
    }
}

/// DELETE /api/plans/:id - Delete a plan
pub async fn delete_plan(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
) -> Response {
    let cmd = DeletePlanCommand {
        actor_id: user.id,
        plan_id: PlanId::from_uuid(id),
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_plan_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Discovery
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/plans?category= - Plans by category
pub async fn list_plans(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<PlanListParams>,
) -> Response {
    let result = match params.category {
        Some(category) => handlers.queries.list_by_category(&category).await,
        None => handlers.queries.list_by_creator(&user.id).await,
    };

    match result {
        Ok(plans) => plan_list_response(&plans),
        Err(e) => handle_plan_error(e),
    }
}

/// GET /api/plans/enrolled - Plans the actor is enrolled in
pub async fn list_enrolled_plans(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.queries.list_enrolled(&user.id).await {
        Ok(plans) => plan_list_response(&plans),
        Err(e) => handle_plan_error(e),
    }
}

/// GET /api/plans/feed - Plans by followed creators
pub async fn followed_creators_feed(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.queries.followed_creators_feed(&user.id).await {
        Ok(plans) => plan_list_response(&plans),
        Err(e) => handle_plan_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Enrollment
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/plans/:id/enroll - Enroll the actor
pub async fn enroll_in_plan(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
) -> Response {
    let cmd = EnrollInPlanCommand {
        user_id: user.id,
        plan_id: PlanId::from_uuid(id),
    };

    match handlers.enroll_handler.handle(cmd).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_plan_error(e),
    }
}

/// DELETE /api/plans/:id/enroll - Withdraw the actor
pub async fn unenroll_from_plan(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
) -> Response {
    let cmd = UnenrollFromPlanCommand {
        user_id: user.id,
        plan_id: PlanId::from_uuid(id),
    };

    match handlers.unenroll_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_plan_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Topics and progress
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/plans/:id/topics - Append a topic
pub async fn add_topic(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
    Json(req): Json<AddTopicRequest>,
) -> Response {
    let cmd = AddTopicCommand {
        actor_id: user.id,
        plan_id: PlanId::from_uuid(id),
        title: req.title,
        description: req.description,
        resources: req.resources,
    };

    match handlers.add_topic_handler.handle(cmd).await {
        Ok((plan, _topic_id)) => {
            (StatusCode::CREATED, Json(PlanResponse::from(&plan))).into_response()
        }
        Err(e) => handle_plan_error(e),
    }
}

/// PUT /api/plans/:id/topics/:topic_id - Replace a topic's content
pub async fn update_topic(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path((id, topic_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateTopicRequest>,
) -> Response {
    let cmd = UpdateTopicCommand {
        actor_id: user.id,
        plan_id: PlanId::from_uuid(id),
        topic_id: TopicId::from_uuid(topic_id),
        title: req.title,
        description: req.description,
        resources: req.resources,
        completed: req.completed,
    };

    match handlers.update_topic_handler.handle(cmd).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_plan_error(e),
    }
}

/// DELETE /api/plans/:id/topics/:topic_id - Remove a topic
pub async fn remove_topic(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path((id, topic_id)): Path<(Uuid, Uuid)>,
) -> Response {
    let cmd = RemoveTopicCommand {
        actor_id: user.id,
        plan_id: PlanId::from_uuid(id),
        topic_id: TopicId::from_uuid(topic_id),
    };

    match handlers.remove_topic_handler.handle(cmd).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_plan_error(e),
    }
}

/// PUT /api/plans/:id/topics/:topic_id/completion - Toggle completion
pub async fn set_topic_completion(
    State(handlers): State<PlanHandlers>,
    RequireAuth(user): RequireAuth,
    Path((id, topic_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SetCompletionRequest>,
) -> Response {
    let cmd = SetTopicCompletionCommand {
        actor_id: user.id,
        plan_id: PlanId::from_uuid(id),
        topic_id: TopicId::from_uuid(topic_id),
        completed: req.completed,
    };

    match handlers.set_completion_handler.handle(cmd).await {
        Ok(plan) => (StatusCode::OK, Json(PlanResponse::from(&plan))).into_response(),
        Err(e) => handle_plan_error(e),
    }
}

fn plan_list_response(plans: &[crate::domain::plan::LearningPlan]) -> Response {
    let body: Vec<PlanResponse> = plans.iter().map(PlanResponse::from).collect();
    (StatusCode::OK, Json(body)).into_response()
}

fn handle_plan_error(e: PlanError) -> Response {
    error_response(e.code(), e.message())
}
