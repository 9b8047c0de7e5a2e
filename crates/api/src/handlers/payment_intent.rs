use axum::extract::{Extension, Json, State};
use axum::http::StatusCode;
use baliquote_core::services::payment_service::PaymentService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::payment_dto::{
    CreatePaymentIntentRequest, PaymentIntentResponse,
};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/payments/intent",
    tag = "Payments",
    summary = "Start a card payment",
    description = "Creates a payment intent with the gateway for the full quote total in the quote's \
                   display currency and records a pending card payment. \
                   The returned `client_secret` is handed to the browser to confirm the card. \
                   The payment settles when the gateway webhook arrives.",
    operation_id = "createPaymentIntent",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 201, description = "Intent created", body = PaymentIntentResponse),
        (status = 400, description = "Quote is not payable", body = ApiErrorResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
        (status = 409, description = "Quote already paid or a payment is awaiting settlement", body = ApiErrorResponse),
        (status = 502, description = "Gateway error", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Json(req): Json<CreatePaymentIntentRequest>,
) -> Result<(StatusCode, Json<PaymentIntentResponse>), ApiError> {
    let intent = PaymentService::create_payment_intent(&state, agent.id(), req).await?;
    Ok((StatusCode::CREATED, Json(intent)))
}
