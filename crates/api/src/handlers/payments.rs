use axum::extract::{Extension, Json, Path, State};
use baliquote_core::services::payment_service::PaymentService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::payment_dto::PaymentDto;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/payments/{payment_id}",
    tag = "Payments",
    operation_id = "getPayment",
    params(("payment_id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment", body = PaymentDto),
        (status = 404, description = "Payment not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn get_payment(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<PaymentDto>, ApiError> {
    Ok(Json(PaymentService::get_payment(&state, agent.id(), payment_id)?))
}
