use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::entities::enum_types::{PaymentStatus, QuoteStatus, TripStatus};
use baliquote_primitives::models::entities::quote::{NewQuote, Quote, QuoteChanges, QuotePricing};
use baliquote_primitives::schema::{payments, quotes};
use chrono::{NaiveDate, Utc};
use diesel::dsl::{exists, not};
use diesel::prelude::*;
use uuid::Uuid;

pub struct QuoteRepository;

impl QuoteRepository {
    pub fn create(conn: &mut PgConnection, new_quote: NewQuote) -> Result<Quote, ApiError> {
        diesel::insert_into(quotes::table)
            .values(&new_quote)
            .returning(Quote::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Quote>, ApiError> {
        quotes::table
            .find(id)
            .select(Quote::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Quote>, ApiError> {
        quotes::table
            .find(id)
            .select(Quote::as_select())
            .for_update()
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_id_and_agent(
        conn: &mut PgConnection,
        id: Uuid,
        agent_id: Uuid,
    ) -> Result<Option<Quote>, ApiError> {
        quotes::table
            .filter(quotes::id.eq(id))
            .filter(quotes::agent_id.eq(agent_id))
            .select(Quote::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Row-locked variant used inside status-changing transactions.
    pub fn lock_for_agent(
        conn: &mut PgConnection,
        id: Uuid,
        agent_id: Uuid,
    ) -> Result<Quote, ApiError> {
        quotes::table
            .filter(quotes::id.eq(id))
            .filter(quotes::agent_id.eq(agent_id))
            .select(Quote::as_select())
            .for_update()
            .first(conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("Quote not found".into()))
    }

    pub fn get_for_agent(
        conn: &mut PgConnection,
        id: Uuid,
        agent_id: Uuid,
    ) -> Result<Quote, ApiError> {
        Self::find_by_id_and_agent(conn, id, agent_id)?
            .ok_or_else(|| ApiError::NotFound("Quote not found".into()))
    }

    pub fn list(
        conn: &mut PgConnection,
        agent_id: Uuid,
        status: Option<QuoteStatus>,
        client_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Quote>, ApiError> {
        let mut query = quotes::table
            .filter(quotes::agent_id.eq(agent_id))
            .select(Quote::as_select())
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(quotes::status.eq(status));
        }
        if let Some(client_id) = client_id {
            query = query.filter(quotes::client_id.eq(client_id));
        }

        query
            .order(quotes::created_at.desc())
            .limit(limit)
            .offset(offset)
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: &QuoteChanges,
    ) -> Result<Quote, ApiError> {
        diesel::update(quotes::table.find(id))
            .set((changes, quotes::updated_at.eq(Utc::now())))
            .returning(Quote::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn set_pricing(
        conn: &mut PgConnection,
        id: Uuid,
        pricing: &QuotePricing,
    ) -> Result<Quote, ApiError> {
        diesel::update(quotes::table.find(id))
            .set((pricing, quotes::updated_at.eq(Utc::now())))
            .returning(Quote::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn set_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: QuoteStatus,
    ) -> Result<Quote, ApiError> {
        diesel::update(quotes::table.find(id))
            .set((
                quotes::status.eq(status),
                quotes::updated_at.eq(Utc::now()),
            ))
            .returning(Quote::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn mark_sent(conn: &mut PgConnection, id: Uuid) -> Result<Quote, ApiError> {
        let now = Utc::now();
        diesel::update(quotes::table.find(id))
            .set((
                quotes::status.eq(QuoteStatus::Sent),
                quotes::sent_at.eq(Some(now)),
                quotes::updated_at.eq(now),
            ))
            .returning(Quote::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// A paid quote becomes a confirmed trip.
    pub fn mark_paid(conn: &mut PgConnection, id: Uuid) -> Result<Quote, ApiError> {
        diesel::update(quotes::table.find(id))
            .set((
                quotes::status.eq(QuoteStatus::Paid),
                quotes::trip_status.eq(TripStatus::Confirmed),
                quotes::updated_at.eq(Utc::now()),
            ))
            .returning(Quote::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn set_pdf_url(conn: &mut PgConnection, id: Uuid, url: &str) -> Result<Quote, ApiError> {
        diesel::update(quotes::table.find(id))
            .set((
                quotes::pdf_url.eq(Some(url)),
                quotes::updated_at.eq(Utc::now()),
            ))
            .returning(Quote::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<usize, ApiError> {
        diesel::delete(quotes::table.find(id))
            .execute(conn)
            .map_err(ApiError::from)
    }

    /// Sent or approved quotes whose validity ended before `today`. Quotes
    /// with a payment still awaiting the gateway or an admin are left alone.
    pub fn find_expirable(conn: &mut PgConnection, today: NaiveDate) -> Result<Vec<Quote>, ApiError> {
        quotes::table
            .filter(quotes::status.eq_any([QuoteStatus::Sent, QuoteStatus::Approved]))
            .filter(quotes::valid_until.lt(today))
            .filter(not(exists(
                payments::table
                    .filter(payments::quote_id.eq(quotes::id))
                    .filter(payments::status.eq_any(PaymentStatus::IN_FLIGHT)),
            )))
            .select(Quote::as_select())
            .for_update()
            .skip_locked()
            .load(conn)
            .map_err(ApiError::from)
    }
}
