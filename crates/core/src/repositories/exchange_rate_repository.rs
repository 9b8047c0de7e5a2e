use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::entities::enum_types::CurrencyCode;
use baliquote_primitives::models::entities::exchange_rate::{ExchangeRate, NewExchangeRate};
use baliquote_primitives::schema::exchange_rates;
use diesel::prelude::*;

pub struct ExchangeRateRepository;

impl ExchangeRateRepository {
    pub fn find(
        conn: &mut PgConnection,
        currency: CurrencyCode,
    ) -> Result<Option<ExchangeRate>, ApiError> {
        exchange_rates::table
            .find(currency)
            .select(ExchangeRate::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn list(conn: &mut PgConnection) -> Result<Vec<ExchangeRate>, ApiError> {
        exchange_rates::table
            .order(exchange_rates::currency_code.asc())
            .select(ExchangeRate::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn upsert(conn: &mut PgConnection, rate: &NewExchangeRate) -> Result<(), ApiError> {
        diesel::insert_into(exchange_rates::table)
            .values(rate)
            .on_conflict(exchange_rates::currency_code)
            .do_update()
            .set(rate)
            .execute(conn)?;
        Ok(())
    }
}
