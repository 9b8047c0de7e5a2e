use crate::models::entities::enum_types::{CurrencyCode, QuoteStatus, TripStatus};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(belongs_to(crate::models::entities::agent::Agent))]
#[diesel(belongs_to(crate::models::entities::client::Client))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Quote {
    pub id: Uuid,
    pub quote_number: String,
    pub agent_id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub status: QuoteStatus,
    pub trip_status: TripStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_adults: i32,
    pub num_children: i32,

    // IDR amounts are whole rupiah
    pub subtotal_idr: i64,
    pub markup_bps: i32,
    pub markup_idr: i64,
    pub total_price_idr: i64,

    pub display_currency: CurrencyCode,
    pub exchange_rate_snapshot: f64,
    pub total_price_display: f64,
    pub priced_at: Option<DateTime<Utc>>,

    pub valid_until: NaiveDate,
    pub sent_at: Option<DateTime<Utc>>,
    pub pdf_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    pub fn is_priced(&self) -> bool {
        self.priced_at.is_some()
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quotes)]
pub struct NewQuote<'a> {
    pub quote_number: &'a str,
    pub agent_id: Uuid,
    pub client_id: Uuid,
    pub title: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_adults: i32,
    pub num_children: i32,
    pub markup_bps: i32,
    pub display_currency: CurrencyCode,
    pub valid_until: NaiveDate,
    pub notes: Option<&'a str>,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::quotes)]
pub struct QuoteChanges {
    pub client_id: Option<Uuid>,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub num_adults: Option<i32>,
    pub num_children: Option<i32>,
    pub markup_bps: Option<i32>,
    pub display_currency: Option<CurrencyCode>,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Totals written back by the pricing step. A `None` price stamp clears
/// the column so the quote reads as unpriced.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(treat_none_as_null = true)]
pub struct QuotePricing {
    pub subtotal_idr: i64,
    pub markup_bps: i32,
    pub markup_idr: i64,
    pub total_price_idr: i64,
    pub exchange_rate_snapshot: f64,
    pub total_price_display: f64,
    pub priced_at: Option<DateTime<Utc>>,
}
