use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::quote_dto::{LineItemsInput, QuoteOptionInput};
use baliquote_primitives::models::entities::quote_items::{
    NewQuoteDay, NewQuoteHotel, NewQuoteOption, NewQuoteTransport, QuoteDay, QuoteHotel,
    QuoteOption, QuoteTransport,
};
use baliquote_primitives::schema::{quote_days, quote_hotels, quote_options, quote_transports};
use diesel::prelude::*;
use uuid::Uuid;

/// Every line item of a quote, as stored.
#[derive(Debug, Clone, Default)]
pub struct QuoteItems {
    pub hotels: Vec<QuoteHotel>,
    pub transports: Vec<QuoteTransport>,
    pub days: Vec<QuoteDay>,
    pub options: Vec<QuoteOption>,
}

impl QuoteItems {
    pub fn options_for_day(&self, day_id: Uuid) -> Vec<QuoteOption> {
        self.options
            .iter()
            .filter(|o| o.quote_day_id == Some(day_id))
            .cloned()
            .collect()
    }

    pub fn extras(&self) -> Vec<QuoteOption> {
        self.options
            .iter()
            .filter(|o| o.quote_day_id.is_none())
            .cloned()
            .collect()
    }
}

pub struct QuoteItemRepository;

impl QuoteItemRepository {
    pub fn insert_all(
        conn: &mut PgConnection,
        quote_id: Uuid,
        items: &LineItemsInput,
    ) -> Result<(), ApiError> {
        if !items.hotels.is_empty() {
            let rows: Vec<NewQuoteHotel> = items
                .hotels
                .iter()
                .map(|h| NewQuoteHotel {
                    quote_id,
                    hotel_name: h.hotel_name.trim(),
                    room_type: h.room_type.as_deref(),
                    check_in: h.check_in,
                    check_out: h.check_out,
                    rooms: h.rooms,
                    rate_per_night_idr: h.rate_per_night_idr,
                })
                .collect();

            diesel::insert_into(quote_hotels::table)
                .values(&rows)
                .execute(conn)?;
        }

        if !items.transports.is_empty() {
            let rows: Vec<NewQuoteTransport> = items
                .transports
                .iter()
                .map(|t| NewQuoteTransport {
                    quote_id,
                    transport_type: t.transport_type.trim(),
                    description: t.description.as_deref(),
                    service_date: t.service_date,
                    units: t.units,
                    rate_idr: t.rate_idr,
                })
                .collect();

            diesel::insert_into(quote_transports::table)
                .values(&rows)
                .execute(conn)?;
        }

        for day in &items.days {
            let day_id: Uuid = diesel::insert_into(quote_days::table)
                .values(&NewQuoteDay {
                    quote_id,
                    day_number: day.day_number,
                    day_date: day.day_date,
                    title: day.title.trim(),
                    description: day.description.as_deref(),
                })
                .returning(quote_days::id)
                .get_result(conn)?;

            Self::insert_options(conn, quote_id, Some(day_id), &day.options)?;
        }

        Self::insert_options(conn, quote_id, None, &items.extras)?;

        Ok(())
    }

    fn insert_options(
        conn: &mut PgConnection,
        quote_id: Uuid,
        quote_day_id: Option<Uuid>,
        options: &[QuoteOptionInput],
    ) -> Result<(), ApiError> {
        if options.is_empty() {
            return Ok(());
        }

        let rows: Vec<NewQuoteOption> = options
            .iter()
            .map(|o| NewQuoteOption {
                quote_id,
                quote_day_id,
                name: o.name.trim(),
                description: o.description.as_deref(),
                unit_price_idr: o.unit_price_idr,
                quantity: o.quantity,
                is_selected: o.is_selected,
            })
            .collect();

        diesel::insert_into(quote_options::table)
            .values(&rows)
            .execute(conn)?;

        Ok(())
    }

    /// Options go first, they reference the days.
    pub fn delete_all(conn: &mut PgConnection, quote_id: Uuid) -> Result<(), ApiError> {
        diesel::delete(quote_options::table.filter(quote_options::quote_id.eq(quote_id)))
            .execute(conn)?;
        diesel::delete(quote_days::table.filter(quote_days::quote_id.eq(quote_id)))
            .execute(conn)?;
        diesel::delete(quote_hotels::table.filter(quote_hotels::quote_id.eq(quote_id)))
            .execute(conn)?;
        diesel::delete(quote_transports::table.filter(quote_transports::quote_id.eq(quote_id)))
            .execute(conn)?;
        Ok(())
    }

    pub fn load(conn: &mut PgConnection, quote_id: Uuid) -> Result<QuoteItems, ApiError> {
        let hotels = quote_hotels::table
            .filter(quote_hotels::quote_id.eq(quote_id))
            .order((quote_hotels::check_in.asc(), quote_hotels::created_at.asc()))
            .select(QuoteHotel::as_select())
            .load(conn)?;

        let transports = quote_transports::table
            .filter(quote_transports::quote_id.eq(quote_id))
            .order(quote_transports::created_at.asc())
            .select(QuoteTransport::as_select())
            .load(conn)?;

        let days = quote_days::table
            .filter(quote_days::quote_id.eq(quote_id))
            .order(quote_days::day_number.asc())
            .select(QuoteDay::as_select())
            .load(conn)?;

        let options = quote_options::table
            .filter(quote_options::quote_id.eq(quote_id))
            .order(quote_options::created_at.asc())
            .select(QuoteOption::as_select())
            .load(conn)?;

        Ok(QuoteItems {
            hotels,
            transports,
            days,
            options,
        })
    }
}
