use crate::models::entities::enum_types::CurrencyCode;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::exchange_rates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ExchangeRate {
    pub currency_code: CurrencyCode,
    /// Rupiah per one unit of `currency_code`.
    pub rate_to_idr: f64,
    pub source: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::exchange_rates)]
pub struct NewExchangeRate {
    pub currency_code: CurrencyCode,
    pub rate_to_idr: f64,
    pub source: String,
    pub updated_at: DateTime<Utc>,
}
