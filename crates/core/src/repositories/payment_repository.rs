use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::entities::enum_types::PaymentStatus;
use baliquote_primitives::models::entities::payment::{NewPayment, Payment};
use baliquote_primitives::schema::payments;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

pub struct PaymentRepository;

impl PaymentRepository {
    pub fn create(conn: &mut PgConnection, new_payment: NewPayment) -> Result<Payment, ApiError> {
        diesel::insert_into(payments::table)
            .values(&new_payment)
            .returning(Payment::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Payment>, ApiError> {
        payments::table
            .find(id)
            .select(Payment::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Payment>, ApiError> {
        payments::table
            .find(id)
            .select(Payment::as_select())
            .for_update()
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_id_and_agent(
        conn: &mut PgConnection,
        id: Uuid,
        agent_id: Uuid,
    ) -> Result<Option<Payment>, ApiError> {
        payments::table
            .filter(payments::id.eq(id))
            .filter(payments::agent_id.eq(agent_id))
            .select(Payment::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_gateway_reference_for_update(
        conn: &mut PgConnection,
        reference: &str,
    ) -> Result<Option<Payment>, ApiError> {
        payments::table
            .filter(payments::gateway_reference.eq(reference))
            .select(Payment::as_select())
            .for_update()
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn has_succeeded(conn: &mut PgConnection, quote_id: Uuid) -> Result<bool, ApiError> {
        diesel::select(diesel::dsl::exists(
            payments::table
                .filter(payments::quote_id.eq(quote_id))
                .filter(payments::status.eq(PaymentStatus::Succeeded)),
        ))
        .get_result(conn)
        .map_err(ApiError::from)
    }

    /// Card intents awaiting the gateway or manual proofs awaiting an admin.
    pub fn has_in_flight(conn: &mut PgConnection, quote_id: Uuid) -> Result<bool, ApiError> {
        diesel::select(diesel::dsl::exists(
            payments::table
                .filter(payments::quote_id.eq(quote_id))
                .filter(payments::status.eq_any(PaymentStatus::IN_FLIGHT)),
        ))
        .get_result(conn)
        .map_err(ApiError::from)
    }

    pub fn list_for_quote(
        conn: &mut PgConnection,
        quote_id: Uuid,
    ) -> Result<Vec<Payment>, ApiError> {
        payments::table
            .filter(payments::quote_id.eq(quote_id))
            .order(payments::created_at.desc())
            .select(Payment::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    /// Oldest first so the verification queue is worked in arrival order.
    pub fn list_pending_verification(conn: &mut PgConnection) -> Result<Vec<Payment>, ApiError> {
        payments::table
            .filter(payments::is_manual.eq(true))
            .filter(payments::status.eq(PaymentStatus::PendingVerification))
            .order(payments::created_at.asc())
            .select(Payment::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn mark_succeeded(
        conn: &mut PgConnection,
        id: Uuid,
        verified_by: Option<Uuid>,
    ) -> Result<Payment, ApiError> {
        let now = Utc::now();
        diesel::update(payments::table.find(id))
            .set((
                payments::status.eq(PaymentStatus::Succeeded),
                payments::verified_by.eq(verified_by),
                payments::verified_at.eq(verified_by.map(|_| now)),
                payments::updated_at.eq(now),
            ))
            .returning(Payment::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn mark_failed(
        conn: &mut PgConnection,
        id: Uuid,
        reason: &str,
        verified_by: Option<Uuid>,
    ) -> Result<Payment, ApiError> {
        let now = Utc::now();
        diesel::update(payments::table.find(id))
            .set((
                payments::status.eq(PaymentStatus::Failed),
                payments::rejection_reason.eq(Some(reason)),
                payments::verified_by.eq(verified_by),
                payments::verified_at.eq(verified_by.map(|_| now)),
                payments::updated_at.eq(now),
            ))
            .returning(Payment::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }
}
