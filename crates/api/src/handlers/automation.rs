use axum::extract::{Json, State};
use baliquote_core::services::automation_service::AutomationService;
use baliquote_core::AppState;
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::exchange_rate_dto::ExpireQuotesResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/admin/automation/expire-quotes",
    tag = "Admin",
    summary = "Expire overdue quotes now",
    description = "Moves sent and approved quotes whose validity date has passed to **expired**. \
                   The same sweep runs daily in the background.",
    operation_id = "adminExpireQuotes",
    responses(
        (status = 200, description = "Sweep result", body = ExpireQuotesResponse),
        (status = 403, description = "Admin access required", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn expire_quotes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExpireQuotesResponse>, ApiError> {
    Ok(Json(AutomationService::expire_quotes(&state)?))
}
