use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::quote_days)]
#[diesel(belongs_to(crate::models::entities::quote::Quote))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuoteDay {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub day_number: i32,
    pub day_date: Option<NaiveDate>,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quote_days)]
pub struct NewQuoteDay<'a> {
    pub quote_id: Uuid,
    pub day_number: i32,
    pub day_date: Option<NaiveDate>,
    pub title: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::quote_options)]
#[diesel(belongs_to(crate::models::entities::quote::Quote))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuoteOption {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub quote_day_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub unit_price_idr: i64,
    pub quantity: i32,
    pub is_selected: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quote_options)]
pub struct NewQuoteOption<'a> {
    pub quote_id: Uuid,
    pub quote_day_id: Option<Uuid>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub unit_price_idr: i64,
    pub quantity: i32,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::quote_hotels)]
#[diesel(belongs_to(crate::models::entities::quote::Quote))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuoteHotel {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub hotel_name: String,
    pub room_type: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i32,
    pub rate_per_night_idr: i64,
    pub created_at: DateTime<Utc>,
}

impl QuoteHotel {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quote_hotels)]
pub struct NewQuoteHotel<'a> {
    pub quote_id: Uuid,
    pub hotel_name: &'a str,
    pub room_type: Option<&'a str>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i32,
    pub rate_per_night_idr: i64,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::quote_transports)]
#[diesel(belongs_to(crate::models::entities::quote::Quote))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuoteTransport {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub transport_type: String,
    pub description: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub units: i32,
    pub rate_idr: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quote_transports)]
pub struct NewQuoteTransport<'a> {
    pub quote_id: Uuid,
    pub transport_type: &'a str,
    pub description: Option<&'a str>,
    pub service_date: Option<NaiveDate>,
    pub units: i32,
    pub rate_idr: i64,
}
