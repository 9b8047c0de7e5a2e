use axum::extract::{Extension, Json, Path, Query, State};
use axum::http::StatusCode;
use baliquote_core::services::client_service::ClientService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::client_dto::{
    ClientDto, ClientListQuery, ClientsResponse, CreateClientRequest, UpdateClientRequest,
};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    summary = "List the agent's clients",
    operation_id = "listClients",
    params(ClientListQuery),
    responses(
        (status = 200, description = "Clients ordered by name", body = ClientsResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 403, description = "Agent not approved", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Query(query): Query<ClientListQuery>,
) -> Result<Json<ClientsResponse>, ApiError> {
    Ok(Json(ClientService::list(&state, agent.id(), query)?))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    summary = "Create a client",
    description = "Emails are unique per agent and stored lower-cased.",
    operation_id = "createClient",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = ClientDto),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 409, description = "Email already used by another client", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Json(req): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientDto>), ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let client = ClientService::create(&state, agent.id(), req)?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    get,
    path = "/api/clients/{client_id}",
    tag = "Clients",
    operation_id = "getClient",
    params(("client_id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client", body = ClientDto),
        (status = 404, description = "Client not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<ClientDto>, ApiError> {
    Ok(Json(ClientService::get(&state, agent.id(), client_id)?))
}

#[utoipa::path(
    patch,
    path = "/api/clients/{client_id}",
    tag = "Clients",
    operation_id = "updateClient",
    params(("client_id" = Uuid, Path, description = "Client ID")),
    request_body = UpdateClientRequest,
    responses(
        (status = 200, description = "Updated client", body = ClientDto),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 404, description = "Client not found", body = ApiErrorResponse),
        (status = 409, description = "Email already used by another client", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn update_client(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(client_id): Path<Uuid>,
    Json(req): Json<UpdateClientRequest>,
) -> Result<Json<ClientDto>, ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(ClientService::update(&state, agent.id(), client_id, req)?))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{client_id}",
    tag = "Clients",
    summary = "Delete a client",
    description = "Refused with 409 while any quote references the client.",
    operation_id = "deleteClient",
    params(("client_id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found", body = ApiErrorResponse),
        (status = 409, description = "Client has quotes", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(client_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ClientService::delete(&state, agent.id(), client_id)?;
    Ok(StatusCode::NO_CONTENT)
}
