use axum::extract::{Extension, Json, Path, State};
use baliquote_core::services::payment_service::PaymentService;
use baliquote_core::services::quote_service::QuoteService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::payment_dto::PaymentsResponse;
use baliquote_primitives::models::dtos::quote_dto::QuoteDetailResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/quotes/{quote_id}/price",
    tag = "Quotes",
    summary = "Reprice a quote",
    description = "Recomputes subtotal, markup and total from the line items and snapshots the current \
                   exchange rate for the display currency. Fails with 400 when no rate is stored.",
    operation_id = "priceQuote",
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Priced quote", body = QuoteDetailResponse),
        (status = 400, description = "No exchange rate available or quote not editable", body = ApiErrorResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn price_quote(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteDetailResponse>, ApiError> {
    Ok(Json(QuoteService::reprice_quote(&state, agent.id(), quote_id)?))
}

#[utoipa::path(
    post,
    path = "/api/quotes/{quote_id}/send",
    tag = "Quotes",
    summary = "Mark a quote as sent to the client",
    description = "Requires a priced quote with a positive total whose validity date has not passed.",
    operation_id = "sendQuote",
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote sent", body = QuoteDetailResponse),
        (status = 400, description = "Quote is unpriced, past its validity or cannot be sent", body = ApiErrorResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn send_quote(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteDetailResponse>, ApiError> {
    Ok(Json(QuoteService::send_quote(&state, agent.id(), quote_id)?))
}

#[utoipa::path(
    post,
    path = "/api/quotes/{quote_id}/approve",
    tag = "Quotes",
    summary = "Record client approval",
    operation_id = "approveQuote",
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote approved", body = QuoteDetailResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
        (status = 400, description = "Transition not allowed", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn approve_quote(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteDetailResponse>, ApiError> {
    Ok(Json(QuoteService::approve_quote(&state, agent.id(), quote_id)?))
}

#[utoipa::path(
    post,
    path = "/api/quotes/{quote_id}/void",
    tag = "Quotes",
    summary = "Void a quote",
    description = "Paid, expired and already void quotes cannot be voided.",
    operation_id = "voidQuote",
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote voided", body = QuoteDetailResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
        (status = 400, description = "Transition not allowed", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn void_quote(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<QuoteDetailResponse>, ApiError> {
    Ok(Json(QuoteService::void_quote(&state, agent.id(), quote_id)?))
}

#[utoipa::path(
    get,
    path = "/api/quotes/{quote_id}/payments",
    tag = "Payments",
    summary = "Payments recorded against a quote",
    operation_id = "listQuotePayments",
    params(("quote_id" = Uuid, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Payments, newest first", body = PaymentsResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn list_quote_payments(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<PaymentsResponse>, ApiError> {
    Ok(Json(PaymentService::list_for_quote(&state, agent.id(), quote_id)?))
}
