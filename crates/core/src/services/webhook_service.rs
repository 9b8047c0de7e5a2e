use crate::app_state::AppState;
use crate::repositories::notification_repository::NotificationRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::services::notification_service::NotificationService;
use axum::body::Bytes;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::payment_dto::GatewayWebhookEvent;
use baliquote_primitives::models::entities::enum_types::{
    NotificationKind, PaymentStatus, QuoteStatus,
};
use diesel::prelude::*;
use hmac::{Hmac, Mac};
use http::HeaderMap;
use secrecy::ExposeSecret;
use sha2::Sha256;
use tracing::{info, warn};

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-gateway-signature";
pub const EVENT_PAYMENT_SUCCEEDED: &str = "payment_intent.succeeded";
pub const EVENT_PAYMENT_FAILED: &str = "payment_intent.payment_failed";
pub const DUPLICATE_CAPTURE_REASON: &str =
    "Captured after the quote was already paid, refund required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Processed,
    Duplicate,
    Ignored,
    /// Funds captured for a quote another payment already settled.
    RefundRequired,
}

impl WebhookOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            WebhookOutcome::Processed => "processed",
            WebhookOutcome::Duplicate => "duplicate",
            WebhookOutcome::Ignored => "ignored",
            WebhookOutcome::RefundRequired => "refund_required",
        }
    }
}

pub struct WebhookService;

impl WebhookService {
    /// Hex HMAC-SHA256 of the raw body.
    pub fn sign_payload(secret: &str, payload: &[u8]) -> Result<String, ApiError> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| ApiError::Internal("Invalid webhook secret".into()))?;
        mac.update(payload);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    pub fn verify_signature(secret: &str, payload: &[u8], signature: &str) -> Result<(), ApiError> {
        let provided = hex::decode(signature.trim())
            .map_err(|_| ApiError::Webhook("Malformed gateway signature".into()))?;

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| ApiError::Internal("Invalid webhook secret".into()))?;
        mac.update(payload);

        mac.verify_slice(&provided)
            .map_err(|_| ApiError::Webhook("Invalid gateway signature".into()))
    }

    pub fn construct_event(
        state: &AppState,
        headers: &HeaderMap,
        body: &Bytes,
    ) -> Result<GatewayWebhookEvent, ApiError> {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Webhook("Missing gateway signature".into()))?;

        Self::verify_signature(
            state.config.gateway_details.webhook_secret.expose_secret(),
            body,
            signature,
        )?;

        serde_json::from_slice(body)
            .map_err(|e| ApiError::Webhook(format!("Invalid webhook payload: {}", e)))
    }

    pub fn handle_event(
        state: &AppState,
        event: GatewayWebhookEvent,
    ) -> Result<WebhookOutcome, ApiError> {
        let succeeded = match event.event_type.as_str() {
            EVENT_PAYMENT_SUCCEEDED => true,
            EVENT_PAYMENT_FAILED => false,
            other => {
                info!(event_id = %event.id, event_type = other, "Webhook event ignored");
                return Ok(WebhookOutcome::Ignored);
            }
        };

        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let intent_id = event.data.intent_id.as_str();

        conn.transaction::<_, ApiError, _>(|conn| {
            let Some(payment) =
                PaymentRepository::find_by_gateway_reference_for_update(conn, intent_id)?
            else {
                warn!(intent_id, "Webhook for unknown payment intent");
                return Ok(WebhookOutcome::Ignored);
            };

            if payment.status.is_terminal() {
                info!(payment_id = %payment.id, status = %payment.status, "Repeated webhook ignored");
                return Ok(WebhookOutcome::Duplicate);
            }

            let quote = QuoteRepository::find_by_id_for_update(conn, payment.quote_id)?
                .ok_or_else(|| ApiError::NotFound("Quote not found".into()))?;

            if succeeded {
                payment.status.transition(PaymentStatus::Succeeded)?;

                if PaymentRepository::has_succeeded(conn, quote.id)? {
                    let payment = PaymentRepository::mark_failed(
                        conn,
                        payment.id,
                        DUPLICATE_CAPTURE_REASON,
                        None,
                    )?;

                    NotificationRepository::create(
                        conn,
                        &NotificationService::for_admins(
                            payment.agent_id,
                            NotificationKind::PaymentFailed,
                            Some(quote.id),
                            Some(payment.id),
                            format!("Refund required for {}", quote.quote_number),
                            format!(
                                "Intent {} captured {} {:.2} after the quote was paid",
                                intent_id, payment.currency, payment.amount_display
                            ),
                        ),
                    )?;

                    warn!(
                        payment_id = %payment.id,
                        quote_id = %quote.id,
                        intent_id,
                        "Card captured for an already paid quote"
                    );
                    return Ok(WebhookOutcome::RefundRequired);
                }

                let payment = PaymentRepository::mark_succeeded(conn, payment.id, None)?;

                if quote.status.can_transition_to(QuoteStatus::Paid) {
                    QuoteRepository::mark_paid(conn, quote.id)?;
                } else {
                    warn!(
                        quote_id = %quote.id,
                        status = %quote.status,
                        "Payment captured for a quote that cannot be marked paid"
                    );
                }

                NotificationRepository::create(
                    conn,
                    &NotificationService::for_agent(
                        payment.agent_id,
                        NotificationKind::PaymentReceived,
                        Some(quote.id),
                        Some(payment.id),
                        format!("Payment received for {}", quote.quote_number),
                        format!(
                            "{} {:.2} was paid by card",
                            payment.currency, payment.amount_display
                        ),
                    ),
                )?;

                info!(payment_id = %payment.id, quote_id = %quote.id, "Card payment succeeded");
            } else {
                payment.status.transition(PaymentStatus::Failed)?;

                let reason = event
                    .data
                    .failure_message
                    .as_deref()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .unwrap_or("Payment declined by the gateway");

                let payment = PaymentRepository::mark_failed(conn, payment.id, reason, None)?;

                NotificationRepository::create(
                    conn,
                    &NotificationService::for_agent(
                        payment.agent_id,
                        NotificationKind::PaymentFailed,
                        Some(quote.id),
                        Some(payment.id),
                        format!("Payment failed for {}", quote.quote_number),
                        reason,
                    ),
                )?;

                info!(payment_id = %payment.id, "Card payment failed: {}", reason);
            }

            Ok(WebhookOutcome::Processed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    #[test]
    fn signature_round_trip_verifies() {
        let body = br#"{"id":"evt_1","type":"payment_intent.succeeded"}"#;
        let signature = WebhookService::sign_payload(SECRET, body).unwrap();

        assert_eq!(signature.len(), 64);
        assert!(WebhookService::verify_signature(SECRET, body, &signature).is_ok());
    }

    #[test]
    fn tampered_body_or_wrong_secret_fails() {
        let body = br#"{"id":"evt_1"}"#;
        let signature = WebhookService::sign_payload(SECRET, body).unwrap();

        assert!(WebhookService::verify_signature(SECRET, br#"{"id":"evt_2"}"#, &signature).is_err());
        assert!(WebhookService::verify_signature("other", body, &signature).is_err());
    }

    #[test]
    fn non_hex_signature_is_a_webhook_error() {
        let err = WebhookService::verify_signature(SECRET, b"{}", "not-hex").unwrap_err();
        assert!(matches!(err, ApiError::Webhook(_)));
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(WebhookOutcome::Duplicate.as_str(), "duplicate");
        assert_eq!(WebhookOutcome::Processed.as_str(), "processed");
        assert_eq!(WebhookOutcome::RefundRequired.as_str(), "refund_required");
    }
}
