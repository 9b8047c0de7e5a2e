use axum::extract::{Extension, Json, Path, Query, State};
use baliquote_core::services::agent_service::AgentService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::agent_dto::{AgentDto, AgentListQuery, AgentsResponse};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/admin/agents",
    tag = "Admin",
    summary = "List agents",
    operation_id = "adminListAgents",
    params(AgentListQuery),
    responses(
        (status = 200, description = "Agents", body = AgentsResponse),
        (status = 403, description = "Admin access required", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn list_agents(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AgentListQuery>,
) -> Result<Json<AgentsResponse>, ApiError> {
    Ok(Json(AgentService::list(
        &state,
        query.pending_only.unwrap_or(false),
    )?))
}

#[utoipa::path(
    post,
    path = "/api/admin/agents/{agent_id}/approve",
    tag = "Admin",
    summary = "Approve an agent",
    operation_id = "adminApproveAgent",
    params(("agent_id" = Uuid, Path, description = "Agent ID")),
    responses(
        (status = 200, description = "Agent approved", body = AgentDto),
        (status = 403, description = "Admin access required", body = ApiErrorResponse),
        (status = 404, description = "Agent not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn approve_agent(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentAgent>,
    Path(agent_id): Path<Uuid>,
) -> Result<Json<AgentDto>, ApiError> {
    Ok(Json(AgentService::approve(&state, &admin.0, agent_id)?))
}

#[utoipa::path(
    post,
    path = "/api/admin/agents/{agent_id}/revoke",
    tag = "Admin",
    summary = "Revoke an agent's approval",
    operation_id = "adminRevokeAgent",
    params(("agent_id" = Uuid, Path, description = "Agent ID")),
    responses(
        (status = 200, description = "Approval revoked", body = AgentDto),
        (status = 400, description = "Admins cannot revoke themselves", body = ApiErrorResponse),
        (status = 403, description = "Admin access required", body = ApiErrorResponse),
        (status = 404, description = "Agent not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn revoke_agent(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentAgent>,
    Path(agent_id): Path<Uuid>,
) -> Result<Json<AgentDto>, ApiError> {
    Ok(Json(AgentService::revoke(&state, &admin.0, agent_id)?))
}
