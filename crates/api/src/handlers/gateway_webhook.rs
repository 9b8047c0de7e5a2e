use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use baliquote_core::services::webhook_service::WebhookService;
use baliquote_core::AppState;
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::payment_dto::{GatewayWebhookEvent, WebhookAck};
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    post,
    path = "/api/payments/webhook",
    tag = "Payments",
    summary = "Payment gateway webhook",
    description = "Receives payment intent events. The raw body must be signed with the shared webhook secret \
                   (hex HMAC-SHA256 in the `x-gateway-signature` header). \
                   Repeated deliveries are acknowledged without side effects.",
    operation_id = "gatewayWebhook",
    request_body = GatewayWebhookEvent,
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAck),
        (status = 400, description = "Missing or invalid signature", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn gateway_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let event = WebhookService::construct_event(&state, &headers, &body)?;
    let event_id = event.id.clone();

    let outcome = WebhookService::handle_event(&state, event)?;
    info!(event_id = %event_id, outcome = outcome.as_str(), "Gateway webhook handled");

    Ok(Json(WebhookAck {
        received: true,
        outcome: outcome.as_str().to_string(),
    }))
}
