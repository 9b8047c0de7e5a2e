use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Extension, Json, Multipart, State};
use axum::http::StatusCode;
use baliquote_core::services::verification_service::VerificationService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::payment_dto::{
    ManualPaymentForm, ManualPaymentSubmission, PaymentDto, UploadedFile,
};
use baliquote_primitives::models::entities::enum_types::PaymentMethod;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

fn multipart_error(e: MultipartError) -> ApiError {
    warn!("Unreadable multipart body: {}", e);
    ApiError::BadRequest(format!("Invalid multipart body: {}", e.body_text()))
}

async fn text_field(field: Field<'_>) -> Result<Option<String>, ApiError> {
    let value = field.text().await.map_err(multipart_error)?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Reads the form fields in whatever order the client sent them.
async fn read_submission(mut multipart: Multipart) -> Result<ManualPaymentSubmission, ApiError> {
    let mut quote_id = None;
    let mut amount_idr = None;
    let mut method = PaymentMethod::BankTransfer;
    let mut reference_note = None;
    let mut proof = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "quote_id" => {
                if let Some(raw) = text_field(field).await? {
                    let id = Uuid::parse_str(&raw)
                        .map_err(|_| ApiError::BadRequest("quote_id must be a UUID".into()))?;
                    quote_id = Some(id);
                }
            }
            "amount_idr" => {
                if let Some(raw) = text_field(field).await? {
                    let amount = raw.parse::<i64>().map_err(|_| {
                        ApiError::BadRequest("amount_idr must be a whole number".into())
                    })?;
                    amount_idr = Some(amount);
                }
            }
            "method" => {
                if let Some(raw) = text_field(field).await? {
                    method = PaymentMethod::from_str(&raw).map_err(|_| {
                        ApiError::BadRequest(format!("Unknown payment method: {}", raw))
                    })?;
                }
            }
            "reference_note" => reference_note = text_field(field).await?,
            "proof" => {
                let file_name = field.file_name().unwrap_or("proof").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;

                proof = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            other => warn!(field = other, "Ignoring unexpected form field"),
        }
    }

    if method == PaymentMethod::Card {
        return Err(ApiError::BadRequest(
            "Card payments go through the payment intent endpoint".into(),
        ));
    }

    Ok(ManualPaymentSubmission {
        quote_id: quote_id.ok_or_else(|| ApiError::BadRequest("quote_id is required".into()))?,
        amount_idr,
        method,
        reference_note,
        proof: proof.ok_or_else(|| ApiError::BadRequest("A proof file is required".into()))?,
    })
}

#[utoipa::path(
    post,
    path = "/api/payments/manual",
    tag = "Payments",
    summary = "Submit a manual payment with proof",
    description = "Records a bank transfer (or other offline) payment. \
                   Send `multipart/form-data` with `quote_id`, the `proof` file (JPEG, PNG or PDF) and optionally \
                   `amount_idr`, `method` and `reference_note`. \
                   The payment waits in **pending_verification** until an admin approves or rejects it.",
    operation_id = "submitManualPayment",
    request_body(content = ManualPaymentForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Payment submitted for verification", body = PaymentDto),
        (status = 400, description = "Invalid form or quote not payable", body = ApiErrorResponse),
        (status = 404, description = "Quote not found", body = ApiErrorResponse),
        (status = 409, description = "Quote already paid or a payment is awaiting settlement", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn submit_manual_payment(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PaymentDto>), ApiError> {
    let submission = read_submission(multipart).await?;
    let payment = VerificationService::submit_manual_payment(&state, agent.id(), submission).await?;

    Ok((StatusCode::CREATED, Json(payment)))
}
