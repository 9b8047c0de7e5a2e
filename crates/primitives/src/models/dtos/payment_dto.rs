use crate::models::entities::enum_types::{CurrencyCode, PaymentMethod, PaymentStatus};
use crate::models::entities::payment::Payment;
use crate::utility::validate_not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Gateway payments ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentIntentRequest {
    pub quote_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentResponse {
    pub payment_id: Uuid,
    #[schema(example = "pi_mock_3f1c9e0b_secret_8d2a")]
    pub client_secret: String,
    pub gateway_reference: String,
    pub amount_idr: i64,
    pub amount: f64,
    pub currency: CurrencyCode,
    pub status: PaymentStatus,
}

/// Event posted by the payment gateway.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GatewayWebhookEvent {
    #[schema(example = "evt_9a7c")]
    pub id: String,
    #[serde(rename = "type")]
    #[schema(example = "payment_intent.succeeded")]
    pub event_type: String,
    pub data: GatewayEventData,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GatewayEventData {
    pub intent_id: String,
    pub failure_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
    pub outcome: String,
}

// --- Manual payments ---

/// Uploaded proof of payment as read from a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ManualPaymentSubmission {
    pub quote_id: Uuid,
    pub amount_idr: Option<i64>,
    pub method: PaymentMethod,
    pub reference_note: Option<String>,
    pub proof: UploadedFile,
}

/// Multipart form accepted by the manual payment endpoint. Only used for the
/// OpenAPI document; the handler reads the fields one by one.
#[derive(Debug, ToSchema)]
pub struct ManualPaymentForm {
    pub quote_id: Uuid,
    /// Defaults to the quote total; any other amount is refused
    pub amount_idr: Option<i64>,
    /// Defaults to `bank_transfer`
    pub method: Option<PaymentMethod>,
    pub reference_note: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub proof: Vec<u8>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RejectPaymentRequest {
    #[schema(example = "Transfer amount does not match the quote total")]
    #[validate(length(min = 1, max = 500), custom(function = "validate_not_blank"))]
    pub reason: String,
}

// --- Responses ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub amount_idr: i64,
    pub currency: CurrencyCode,
    pub amount_display: f64,
    pub status: PaymentStatus,
    pub is_manual: bool,
    pub method: PaymentMethod,
    pub gateway_reference: Option<String>,
    pub proof_url: Option<String>,
    pub reference_note: Option<String>,
    pub rejection_reason: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            quote_id: p.quote_id,
            amount_idr: p.amount_idr,
            currency: p.currency,
            amount_display: p.amount_display,
            status: p.status,
            is_manual: p.is_manual,
            method: p.method,
            gateway_reference: p.gateway_reference,
            proof_url: p.proof_url,
            reference_note: p.reference_note,
            rejection_reason: p.rejection_reason,
            verified_at: p.verified_at,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentsResponse {
    pub payments: Vec<PaymentDto>,
}
