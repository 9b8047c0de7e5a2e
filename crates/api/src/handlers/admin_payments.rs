use axum::extract::{Extension, Json, Path, State};
use baliquote_core::services::verification_service::VerificationService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::payment_dto::{
    PaymentDto, PaymentsResponse, RejectPaymentRequest,
};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/admin/payments/pending",
    tag = "Admin",
    summary = "Manual payments awaiting verification",
    description = "Oldest first, so the queue is worked in submission order.",
    operation_id = "adminPendingPayments",
    responses(
        (status = 200, description = "Pending payments", body = PaymentsResponse),
        (status = 403, description = "Admin access required", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn pending_payments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PaymentsResponse>, ApiError> {
    Ok(Json(VerificationService::list_pending(&state)?))
}

#[utoipa::path(
    post,
    path = "/api/admin/payments/{payment_id}/approve",
    tag = "Admin",
    summary = "Approve a manual payment",
    description = "Marks the payment succeeded, the quote **paid** and the trip confirmed, in one transaction.",
    operation_id = "adminApprovePayment",
    params(("payment_id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment approved", body = PaymentDto),
        (status = 400, description = "Payment is not awaiting verification or does not cover the quote total", body = ApiErrorResponse),
        (status = 403, description = "Admin access required", body = ApiErrorResponse),
        (status = 404, description = "Payment not found", body = ApiErrorResponse),
        (status = 409, description = "Quote already paid", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn approve_payment(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentAgent>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<PaymentDto>, ApiError> {
    Ok(Json(VerificationService::approve_payment(
        &state, &admin.0, payment_id,
    )?))
}

#[utoipa::path(
    post,
    path = "/api/admin/payments/{payment_id}/reject",
    tag = "Admin",
    summary = "Reject a manual payment",
    description = "Fails the payment with a reason. The quote keeps its status so a new proof can be submitted.",
    operation_id = "adminRejectPayment",
    params(("payment_id" = Uuid, Path, description = "Payment ID")),
    request_body = RejectPaymentRequest,
    responses(
        (status = 200, description = "Payment rejected", body = PaymentDto),
        (status = 400, description = "Missing reason or payment not awaiting verification", body = ApiErrorResponse),
        (status = 403, description = "Admin access required", body = ApiErrorResponse),
        (status = 404, description = "Payment not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn reject_payment(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentAgent>,
    Path(payment_id): Path<Uuid>,
    Json(req): Json<RejectPaymentRequest>,
) -> Result<Json<PaymentDto>, ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(VerificationService::reject_payment(
        &state,
        &admin.0,
        payment_id,
        &req.reason,
    )?))
}
