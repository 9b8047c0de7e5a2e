use crate::app_state::AppState;
use crate::repositories::notification_repository::NotificationRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::services::notification_service::NotificationService;
use crate::services::payment_service::PaymentService;
use crate::services::pricing_service::PricingService;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::payment_dto::{
    ManualPaymentSubmission, PaymentDto, PaymentsResponse,
};
use baliquote_primitives::models::entities::agent::Agent;
use baliquote_primitives::models::entities::enum_types::{
    NotificationKind, PaymentStatus, QuoteStatus,
};
use baliquote_primitives::models::entities::payment::{NewPayment, Payment};
use baliquote_primitives::utility::clean_optional;
use diesel::prelude::*;
use tracing::info;
use uuid::Uuid;

/// Proof formats accepted for manual payments, with their file extension.
const ACCEPTED_PROOF_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("application/pdf", "pdf"),
];

pub struct VerificationService;

impl VerificationService {
    pub fn proof_extension(content_type: &str) -> Option<&'static str> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        ACCEPTED_PROOF_TYPES
            .iter()
            .find(|(mime, _)| *mime == essence)
            .map(|(_, ext)| *ext)
    }

    /// Uploads the proof and records a payment waiting for an admin.
    pub async fn submit_manual_payment(
        state: &AppState,
        agent_id: Uuid,
        submission: ManualPaymentSubmission,
    ) -> Result<PaymentDto, ApiError> {
        let storage = &state.config.storage_details;

        let extension = Self::proof_extension(&submission.proof.content_type).ok_or_else(|| {
            ApiError::BadRequest("Proof must be a JPEG, PNG or PDF file".into())
        })?;

        if submission.proof.bytes.is_empty() {
            return Err(ApiError::BadRequest("Proof file is empty".into()));
        }
        if submission.proof.bytes.len() > storage.max_upload_bytes {
            return Err(ApiError::BadRequest(format!(
                "Proof file exceeds {} bytes",
                storage.max_upload_bytes
            )));
        }

        let quote = {
            let mut conn = state
                .db
                .get()
                .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

            let quote = QuoteRepository::get_for_agent(&mut conn, submission.quote_id, agent_id)?;
            PaymentService::ensure_payable(&mut conn, &quote)?;
            quote
        };

        let amount_idr = submission.amount_idr.unwrap_or(quote.total_price_idr);
        if amount_idr != quote.total_price_idr {
            return Err(ApiError::BadRequest(format!(
                "Payment amount must equal the quote total of IDR {}",
                quote.total_price_idr
            )));
        }
        let amount_display = PricingService::convert_from_idr(
            amount_idr,
            quote.exchange_rate_snapshot,
            quote.display_currency,
        )?;

        let object_path = format!("{}/{}/{}.{}", agent_id, quote.id, Uuid::new_v4(), extension);
        let proof_url = state
            .storage
            .upload(
                &storage.proof_bucket,
                &object_path,
                &submission.proof.content_type,
                submission.proof.bytes,
            )
            .await?;

        let reference_note = clean_optional(submission.reference_note);

        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let payment = conn.transaction::<_, ApiError, _>(|conn| {
            let payment = PaymentService::record_payment(
                conn,
                NewPayment {
                    quote_id: quote.id,
                    agent_id,
                    amount_idr,
                    currency: quote.display_currency,
                    amount_display,
                    status: PaymentStatus::PendingVerification,
                    is_manual: true,
                    method: submission.method,
                    gateway_reference: None,
                    proof_url: Some(&proof_url),
                    reference_note: reference_note.as_deref(),
                },
            )?;

            NotificationRepository::create_many(
                conn,
                &[
                    NotificationService::for_agent(
                        agent_id,
                        NotificationKind::ManualPaymentSubmitted,
                        Some(quote.id),
                        Some(payment.id),
                        format!("Payment proof received for {}", quote.quote_number),
                        "The payment is awaiting verification by our team.",
                    ),
                    NotificationService::for_admins(
                        agent_id,
                        NotificationKind::ManualPaymentSubmitted,
                        Some(quote.id),
                        Some(payment.id),
                        format!("Manual payment to verify for {}", quote.quote_number),
                        format!(
                            "IDR {} via {} awaits verification",
                            amount_idr, submission.method
                        ),
                    ),
                ],
            )?;

            Ok(payment)
        })?;

        info!(payment_id = %payment.id, quote_id = %quote.id, "Manual payment submitted");
        Ok(payment.into())
    }

    pub fn list_pending(state: &AppState) -> Result<PaymentsResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let payments = PaymentRepository::list_pending_verification(&mut conn)?;

        Ok(PaymentsResponse {
            payments: payments.into_iter().map(PaymentDto::from).collect(),
        })
    }

    fn lock_awaiting_verification(
        conn: &mut PgConnection,
        payment_id: Uuid,
    ) -> Result<Payment, ApiError> {
        let payment = PaymentRepository::find_by_id_for_update(conn, payment_id)?
            .ok_or_else(|| ApiError::NotFound("Payment not found".into()))?;

        if !payment.awaits_verification() {
            return Err(ApiError::BadRequest(format!(
                "Payment is not awaiting verification (status: {})",
                payment.status
            )));
        }

        Ok(payment)
    }

    /// Settles a manual payment: the payment succeeds, the quote is paid and
    /// the trip confirmed.
    pub fn approve_payment(
        state: &AppState,
        admin: &Agent,
        payment_id: Uuid,
    ) -> Result<PaymentDto, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let payment = conn.transaction::<_, ApiError, _>(|conn| {
            let payment = Self::lock_awaiting_verification(conn, payment_id)?;
            payment.status.transition(PaymentStatus::Succeeded)?;

            let quote = QuoteRepository::find_by_id_for_update(conn, payment.quote_id)?
                .ok_or_else(|| ApiError::NotFound("Quote not found".into()))?;
            quote.status.transition(QuoteStatus::Paid)?;

            if payment.amount_idr < quote.total_price_idr {
                return Err(ApiError::BadRequest(format!(
                    "Payment of IDR {} does not cover the quote total of IDR {}",
                    payment.amount_idr, quote.total_price_idr
                )));
            }

            if PaymentRepository::has_succeeded(conn, quote.id)? {
                return Err(ApiError::Conflict("Quote has already been paid".into()));
            }

            let payment = PaymentRepository::mark_succeeded(conn, payment.id, Some(admin.id))?;
            let quote = QuoteRepository::mark_paid(conn, quote.id)?;

            NotificationRepository::create(
                conn,
                &NotificationService::for_agent(
                    payment.agent_id,
                    NotificationKind::PaymentApproved,
                    Some(quote.id),
                    Some(payment.id),
                    format!("Payment approved for {}", quote.quote_number),
                    "The manual payment was verified. The trip is confirmed.",
                ),
            )?;

            Ok(payment)
        })?;

        info!(payment_id = %payment.id, admin_id = %admin.id, "Manual payment approved");
        Ok(payment.into())
    }

    /// Fails a manual payment. The quote keeps its status so the agent can
    /// submit a new proof.
    pub fn reject_payment(
        state: &AppState,
        admin: &Agent,
        payment_id: Uuid,
        reason: &str,
    ) -> Result<PaymentDto, ApiError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ApiError::BadRequest("A rejection reason is required".into()));
        }

        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let payment = conn.transaction::<_, ApiError, _>(|conn| {
            let payment = Self::lock_awaiting_verification(conn, payment_id)?;
            payment.status.transition(PaymentStatus::Failed)?;

            let payment = PaymentRepository::mark_failed(conn, payment.id, reason, Some(admin.id))?;

            NotificationRepository::create(
                conn,
                &NotificationService::for_agent(
                    payment.agent_id,
                    NotificationKind::PaymentRejected,
                    Some(payment.quote_id),
                    Some(payment.id),
                    "Manual payment rejected",
                    format!("Reason: {}", reason),
                ),
            )?;

            Ok(payment)
        })?;

        info!(payment_id = %payment.id, admin_id = %admin.id, "Manual payment rejected");
        Ok(payment.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_images_and_pdf_only() {
        assert_eq!(VerificationService::proof_extension("image/png"), Some("png"));
        assert_eq!(VerificationService::proof_extension("IMAGE/JPEG"), Some("jpg"));
        assert_eq!(
            VerificationService::proof_extension("application/pdf; charset=binary"),
            Some("pdf")
        );
        assert_eq!(VerificationService::proof_extension("image/gif"), None);
        assert_eq!(VerificationService::proof_extension("text/html"), None);
    }
}
