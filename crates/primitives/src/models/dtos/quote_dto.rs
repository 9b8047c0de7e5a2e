use crate::models::dtos::client_dto::ClientDto;
use crate::models::entities::enum_types::{CurrencyCode, QuoteStatus, TripStatus};
use crate::models::entities::quote::Quote;
use crate::models::entities::quote_items::{QuoteDay, QuoteHotel, QuoteOption, QuoteTransport};
use crate::utility::{bps_to_percent, validate_not_blank, validate_phone};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Line item inputs ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_hotel_stay"))]
pub struct QuoteHotelInput {
    #[schema(example = "Alaya Resort Ubud")]
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub hotel_name: String,

    #[schema(example = "Deluxe Pool Villa")]
    #[validate(length(max = 120))]
    pub room_type: Option<String>,

    pub check_in: NaiveDate,
    pub check_out: NaiveDate,

    #[validate(range(min = 1, max = 100))]
    pub rooms: i32,

    #[schema(example = 2_750_000)]
    #[validate(range(min = 0))]
    pub rate_per_night_idr: i64,
}

fn validate_hotel_stay(hotel: &QuoteHotelInput) -> Result<(), ValidationError> {
    if hotel.check_out <= hotel.check_in {
        return Err(ValidationError::new("check_out_must_follow_check_in"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct QuoteTransportInput {
    #[schema(example = "Private car with driver")]
    #[validate(length(min = 1, max = 120), custom(function = "validate_not_blank"))]
    pub transport_type: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub service_date: Option<NaiveDate>,

    /// Days, trips or seats depending on the transport type
    #[validate(range(min = 1, max = 365))]
    pub units: i32,

    #[schema(example = 650_000)]
    #[validate(range(min = 0))]
    pub rate_idr: i64,
}

fn default_selected() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct QuoteOptionInput {
    #[schema(example = "Mount Batur sunrise trek")]
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[schema(example = 450_000)]
    #[validate(range(min = 0))]
    pub unit_price_idr: i64,

    #[validate(range(min = 1, max = 1000))]
    pub quantity: i32,

    /// Unselected options are shown to the client but not charged
    #[serde(default = "default_selected")]
    pub is_selected: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct QuoteDayInput {
    #[validate(range(min = 1, max = 60))]
    pub day_number: i32,

    pub day_date: Option<NaiveDate>,

    #[schema(example = "Arrival & Seminyak sunset")]
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(max = 4000))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub options: Vec<QuoteOptionInput>,
}

/// Complete set of line items. When given on update it replaces the
/// existing items wholesale.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_unique_day_numbers"))]
pub struct LineItemsInput {
    #[serde(default)]
    #[validate(nested)]
    pub hotels: Vec<QuoteHotelInput>,

    #[serde(default)]
    #[validate(nested)]
    pub transports: Vec<QuoteTransportInput>,

    #[serde(default)]
    #[validate(nested)]
    pub days: Vec<QuoteDayInput>,

    /// Options not tied to a specific itinerary day
    #[serde(default)]
    #[validate(nested)]
    pub extras: Vec<QuoteOptionInput>,
}

impl LineItemsInput {
    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
            && self.transports.is_empty()
            && self.extras.is_empty()
            && self.days.is_empty()
    }
}

fn validate_unique_day_numbers(items: &LineItemsInput) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    if items.days.iter().all(|d| seen.insert(d.day_number)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_day_number"))
    }
}

// --- Quote requests ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct QuoteClientInput {
    #[schema(example = "Sarah Thompson")]
    #[validate(length(min = 1, max = 160), custom(function = "validate_not_blank"))]
    pub full_name: String,

    #[schema(example = "sarah@example.com")]
    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

fn default_adults() -> i32 {
    1
}

fn default_display_currency() -> CurrencyCode {
    CurrencyCode::IDR
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateQuoteRequest {
    /// Looked up by email within the agent's clients, created when missing
    #[validate(nested)]
    pub client: QuoteClientInput,

    #[schema(example = "7 nights Ubud & Uluwatu honeymoon")]
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default = "default_adults")]
    #[validate(range(min = 1, max = 100))]
    pub num_adults: i32,

    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub num_children: i32,

    /// Falls back to the agent default, then the platform default
    #[schema(example = 15.0)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub markup_percent: Option<f64>,

    #[serde(default = "default_display_currency")]
    pub display_currency: CurrencyCode,

    pub valid_until: Option<NaiveDate>,

    #[validate(length(max = 4000))]
    pub notes: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub items: LineItemsInput,
}

fn validate_create_dates(req: &CreateQuoteRequest) -> Result<(), ValidationError> {
    if req.end_date < req.start_date {
        return Err(ValidationError::new("end_date_before_start_date"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateQuoteRequest {
    pub client_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 100))]
    pub num_adults: Option<i32>,

    #[validate(range(min = 0, max = 100))]
    pub num_children: Option<i32>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub markup_percent: Option<f64>,

    pub display_currency: Option<CurrencyCode>,

    pub valid_until: Option<NaiveDate>,

    #[validate(length(max = 4000))]
    pub notes: Option<String>,

    #[validate(nested)]
    pub items: Option<LineItemsInput>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct QuoteListQuery {
    pub status: Option<QuoteStatus>,
    pub client_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// --- Quote responses ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteDto {
    pub id: Uuid,
    pub quote_number: String,
    pub client_id: Uuid,
    pub title: String,
    pub status: QuoteStatus,
    pub trip_status: TripStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_adults: i32,
    pub num_children: i32,
    pub subtotal_idr: i64,
    pub markup_percent: f64,
    pub markup_idr: i64,
    pub total_price_idr: i64,
    pub display_currency: CurrencyCode,
    pub exchange_rate_snapshot: f64,
    pub total_price_display: f64,
    pub is_priced: bool,
    pub priced_at: Option<DateTime<Utc>>,
    pub valid_until: NaiveDate,
    pub sent_at: Option<DateTime<Utc>>,
    pub pdf_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Quote> for QuoteDto {
    fn from(q: Quote) -> Self {
        let is_priced = q.is_priced();
        Self {
            id: q.id,
            quote_number: q.quote_number,
            client_id: q.client_id,
            title: q.title,
            status: q.status,
            trip_status: q.trip_status,
            start_date: q.start_date,
            end_date: q.end_date,
            num_adults: q.num_adults,
            num_children: q.num_children,
            subtotal_idr: q.subtotal_idr,
            markup_percent: bps_to_percent(q.markup_bps),
            markup_idr: q.markup_idr,
            total_price_idr: q.total_price_idr,
            display_currency: q.display_currency,
            exchange_rate_snapshot: q.exchange_rate_snapshot,
            total_price_display: q.total_price_display,
            is_priced,
            priced_at: q.priced_at,
            valid_until: q.valid_until,
            sent_at: q.sent_at,
            pdf_url: q.pdf_url,
            notes: q.notes,
            created_at: q.created_at,
            updated_at: q.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuotesResponse {
    pub quotes: Vec<QuoteDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteDayDto {
    #[serde(flatten)]
    pub day: QuoteDay,
    pub options: Vec<QuoteOption>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteDetailResponse {
    pub quote: QuoteDto,
    pub client: ClientDto,
    pub hotels: Vec<QuoteHotel>,
    pub transports: Vec<QuoteTransport>,
    pub days: Vec<QuoteDayDto>,
    pub extras: Vec<QuoteOption>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuotePdfResponse {
    pub quote_id: Uuid,
    pub pdf_url: String,
}
