use axum::extract::{Json, State};
use baliquote_core::services::exchange_rate_service::ExchangeRateService;
use baliquote_core::AppState;
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::exchange_rate_dto::{
    ExchangeRatesResponse, FxRefreshResponse,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/exchange-rates",
    tag = "Exchange Rates",
    summary = "Stored exchange rates",
    description = "IDR per one unit of each supported display currency.",
    operation_id = "listExchangeRates",
    responses(
        (status = 200, description = "Rates", body = ExchangeRatesResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn list_exchange_rates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExchangeRatesResponse>, ApiError> {
    Ok(Json(ExchangeRateService::list_rates(&state)?))
}

#[utoipa::path(
    post,
    path = "/api/admin/exchange-rates/refresh",
    tag = "Admin",
    summary = "Refresh exchange rates now",
    description = "Fetches the latest rates from the FX provider and stores them. \
                   Existing quotes keep their snapshot.",
    operation_id = "refreshExchangeRates",
    responses(
        (status = 200, description = "Rates refreshed", body = FxRefreshResponse),
        (status = 403, description = "Admin access required", body = ApiErrorResponse),
        (status = 502, description = "FX provider failed", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn refresh_exchange_rates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FxRefreshResponse>, ApiError> {
    Ok(Json(ExchangeRateService::refresh_rates(&state).await?))
}
