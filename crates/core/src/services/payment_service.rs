use crate::app_state::AppState;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::services::pricing_service::PricingService;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::payment_dto::{
    CreatePaymentIntentRequest, PaymentDto, PaymentIntentResponse, PaymentsResponse,
};
use baliquote_primitives::models::entities::enum_types::{PaymentMethod, PaymentStatus};
use baliquote_primitives::models::entities::payment::{NewPayment, Payment};
use baliquote_primitives::models::entities::quote::Quote;
use diesel::prelude::*;
use tracing::info;
use uuid::Uuid;

pub struct PaymentService;

impl PaymentService {
    /// Checks shared by card and manual payments.
    pub fn ensure_payable(conn: &mut PgConnection, quote: &Quote) -> Result<(), ApiError> {
        if !quote.status.is_payable() {
            return Err(ApiError::BadRequest(format!(
                "Quote is not payable while {}",
                quote.status
            )));
        }

        if !quote.is_priced() || quote.total_price_idr <= 0 {
            return Err(ApiError::BadRequest("Quote has not been priced".into()));
        }

        if PaymentRepository::has_succeeded(conn, quote.id)? {
            return Err(ApiError::Conflict("Quote has already been paid".into()));
        }

        if PaymentRepository::has_in_flight(conn, quote.id)? {
            return Err(ApiError::Conflict(
                "Quote already has a payment awaiting settlement".into(),
            ));
        }

        Ok(())
    }

    /// Re-checks payability under the quote row lock and inserts the payment.
    /// Must run inside a transaction.
    pub fn record_payment(
        conn: &mut PgConnection,
        new_payment: NewPayment,
    ) -> Result<Payment, ApiError> {
        let quote = QuoteRepository::find_by_id_for_update(conn, new_payment.quote_id)?
            .ok_or_else(|| ApiError::NotFound("Quote not found".into()))?;
        Self::ensure_payable(conn, &quote)?;

        if new_payment.amount_idr != quote.total_price_idr {
            return Err(ApiError::Conflict(
                "Quote total changed while the payment was being prepared".into(),
            ));
        }

        PaymentRepository::create(conn, new_payment)
    }

    pub async fn create_payment_intent(
        state: &AppState,
        agent_id: Uuid,
        req: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, ApiError> {
        let quote = {
            let mut conn = state
                .db
                .get()
                .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

            let quote = QuoteRepository::get_for_agent(&mut conn, req.quote_id, agent_id)?;
            Self::ensure_payable(&mut conn, &quote)?;
            quote
        };

        let amount_minor =
            PricingService::to_minor_units(quote.total_price_display, quote.display_currency);

        let intent = state
            .gateway
            .create_payment_intent(amount_minor, quote.display_currency, &quote.quote_number)
            .await?;

        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let payment = conn.transaction::<_, ApiError, _>(|conn| {
            Self::record_payment(
                conn,
                NewPayment {
                    quote_id: quote.id,
                    agent_id,
                    amount_idr: quote.total_price_idr,
                    currency: quote.display_currency,
                    amount_display: quote.total_price_display,
                    status: PaymentStatus::Pending,
                    is_manual: false,
                    method: PaymentMethod::Card,
                    gateway_reference: Some(&intent.id),
                    proof_url: None,
                    reference_note: None,
                },
            )
        })?;

        info!(
            payment_id = %payment.id,
            quote_id = %quote.id,
            intent_id = %intent.id,
            "Payment intent created"
        );

        Ok(PaymentIntentResponse {
            payment_id: payment.id,
            client_secret: intent.client_secret,
            gateway_reference: intent.id,
            amount_idr: payment.amount_idr,
            amount: payment.amount_display,
            currency: payment.currency,
            status: payment.status,
        })
    }

    pub fn get_payment(state: &AppState, agent_id: Uuid, id: Uuid) -> Result<PaymentDto, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        PaymentRepository::find_by_id_and_agent(&mut conn, id, agent_id)?
            .map(PaymentDto::from)
            .ok_or_else(|| ApiError::NotFound("Payment not found".into()))
    }

    pub fn list_for_quote(
        state: &AppState,
        agent_id: Uuid,
        quote_id: Uuid,
    ) -> Result<PaymentsResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        QuoteRepository::get_for_agent(&mut conn, quote_id, agent_id)?;
        let payments = PaymentRepository::list_for_quote(&mut conn, quote_id)?;

        Ok(PaymentsResponse {
            payments: payments.into_iter().map(PaymentDto::from).collect(),
        })
    }
}
