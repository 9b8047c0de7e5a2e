use axum::extract::{Extension, Json, Path, Query, State};
use axum::http::StatusCode;
use baliquote_core::services::quote_service::QuoteService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::quote_dto::{
    CreateQuoteRequest, QuoteDetailResponse, QuoteListQuery, QuotesResponse, UpdateQuoteRequest,
};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/quotes",
    tag = "Quotes",
    summary = "List the agent's quotes",
    description = "Newest first. Filter by `status` or `client_id`; paginate with `limit` (max 100) and `offset`.",
    operation_id = "listQuotes",
    params(QuoteListQuery),
    responses(
        (status = 200, description = "Quotes", body = QuotesResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 403, description = "Agent not approved", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Query(query): Query<QuoteListQuery>,
) -> Result<Json<QuotesResponse>, ApiError> {
    Ok(Json(QuoteService::list_quotes(&state, agent.id(), query)?))
}

#[utoipa::path(
    post,
    path = "/api/quotes",
    tag = "Quotes",
    summary = "Create a quote",
    description = "Creates a **draft** quote with its line items. \
                   The client is matched by email within the agent's book and created when unknown. \
                   Pricing runs right away; if no exchange rate is available for the display currency \
                   the quote is still saved, unpriced, and can be repriced later.",
    operation_id = "createQuote",
    request_body = CreateQuoteRequest,
    responses(
        (status = 201, description = "Quote created", body = QuoteDetailResponse),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 403, description = "Agent not approved", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Json(req): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteDetailResponse>), ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let quote = QuoteService::create_quote(&state, &agent.0, req)?;
    Ok((StatusCode::CREATED, Json(quote)))
}

#[utoipa::path(
    get,
    path = "/api/quotes/{quote_id}",
    tag = "Quotes",
    summary = "Quote with client and line items",
    operation_id = "getQuote",
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote detail", body = QuoteDetailResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteDetailResponse>, ApiError> {
    Ok(Json(QuoteService::get_quote(&state, agent.id(), quote_id)?))
}

#[utoipa::path(
    patch,
    path = "/api/quotes/{quote_id}",
    tag = "Quotes",
    summary = "Edit a quote",
    description = "Only draft and sent quotes are editable. Editing a sent quote moves it back to draft. \
                   When `items` is present every line item is replaced. The quote is repriced afterwards.",
    operation_id = "updateQuote",
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    request_body = UpdateQuoteRequest,
    responses(
        (status = 200, description = "Updated quote", body = QuoteDetailResponse),
        (status = 400, description = "Invalid input or quote no longer editable", body = ApiErrorResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
        (status = 409, description = "A payment for the quote is awaiting settlement", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn update_quote(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(quote_id): Path<Uuid>,
    Json(req): Json<UpdateQuoteRequest>,
) -> Result<Json<QuoteDetailResponse>, ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(QuoteService::update_quote(&state, agent.id(), quote_id, req)?))
}

#[utoipa::path(
    delete,
    path = "/api/quotes/{quote_id}",
    tag = "Quotes",
    summary = "Delete a draft quote",
    operation_id = "deleteQuote",
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 204, description = "Quote deleted"),
        (status = 400, description = "Only drafts can be deleted", body = ApiErrorResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn delete_quote(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(quote_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    QuoteService::delete_quote(&state, agent.id(), quote_id)?;
    Ok(StatusCode::NO_CONTENT)
}
