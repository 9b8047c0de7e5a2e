use axum::extract::{Extension, Json, State};
use axum::http::StatusCode;
use baliquote_core::services::agent_service::AgentService;
use baliquote_core::{AppState, Claims};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::agent_dto::{
    AgentDto, OnboardAgentRequest, UpdateAgentRequest,
};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/agents/me",
    tag = "Agents",
    summary = "Current agent profile",
    description = "Returns the agent profile bound to the session token. \
                   Works for agents still awaiting approval so the frontend can show their status.",
    operation_id = "getCurrentAgent",
    responses(
        (status = 200, description = "Agent profile", body = AgentDto),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "No profile yet, onboarding required", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn current_agent(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<AgentDto>, ApiError> {
    Ok(Json(AgentService::current(&state, &claims)?))
}

#[utoipa::path(
    post,
    path = "/api/agents/me",
    tag = "Agents",
    summary = "Onboard as an agent",
    description = "Creates the agent profile for the authenticated identity. \
                   The profile starts **unapproved**; an admin must approve it before quotes can be created. \
                   Calling this again returns the existing profile unchanged.",
    operation_id = "onboardAgent",
    request_body = OnboardAgentRequest,
    responses(
        (status = 201, description = "Profile created", body = AgentDto),
        (status = 200, description = "Profile already existed", body = AgentDto),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn onboard_agent(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<OnboardAgentRequest>,
) -> Result<(StatusCode, Json<AgentDto>), ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let (agent, created) = AgentService::onboard(&state, &claims, req)?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(agent)))
}

#[utoipa::path(
    patch,
    path = "/api/agents/me",
    tag = "Agents",
    summary = "Update current agent profile",
    operation_id = "updateCurrentAgent",
    request_body = UpdateAgentRequest,
    responses(
        (status = 200, description = "Updated profile", body = AgentDto),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "No profile yet", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn update_current_agent(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateAgentRequest>,
) -> Result<Json<AgentDto>, ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(AgentService::update_current(&state, &claims, req)?))
}
