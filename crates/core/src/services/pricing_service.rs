use crate::repositories::exchange_rate_repository::ExchangeRateRepository;
use crate::repositories::quote_item_repository::{QuoteItemRepository, QuoteItems};
use crate::repositories::quote_repository::QuoteRepository;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::entities::enum_types::CurrencyCode;
use baliquote_primitives::models::entities::quote::{Quote, QuotePricing};
use chrono::Utc;
use diesel::PgConnection;
use tracing::info;

const BPS_SCALE: i128 = 10_000;

fn overflow() -> ApiError {
    ApiError::BadRequest("Quote total is too large".into())
}

pub struct PricingService;

impl PricingService {
    /// Sum of every chargeable line in rupiah. Unselected options are free.
    pub fn subtotal_idr(items: &QuoteItems) -> Result<i64, ApiError> {
        let hotels = items.hotels.iter().map(|h| {
            h.nights()
                .checked_mul(h.rooms as i64)
                .and_then(|v| v.checked_mul(h.rate_per_night_idr))
        });

        let transports = items
            .transports
            .iter()
            .map(|t| (t.units as i64).checked_mul(t.rate_idr));

        let options = items
            .options
            .iter()
            .filter(|o| o.is_selected)
            .map(|o| (o.quantity as i64).checked_mul(o.unit_price_idr));

        hotels
            .chain(transports)
            .chain(options)
            .try_fold(0i64, |acc, line| line.and_then(|v| acc.checked_add(v)))
            .ok_or_else(overflow)
    }

    /// Half-up rounding to whole rupiah.
    pub fn markup_idr(subtotal_idr: i64, markup_bps: i32) -> Result<i64, ApiError> {
        let raw = subtotal_idr as i128 * markup_bps as i128;
        let rounded = (raw + BPS_SCALE / 2).div_euclid(BPS_SCALE);
        i64::try_from(rounded).map_err(|_| overflow())
    }

    /// `rate_to_idr` is rupiah per unit of `currency`.
    pub fn convert_from_idr(
        amount_idr: i64,
        rate_to_idr: f64,
        currency: CurrencyCode,
    ) -> Result<f64, ApiError> {
        if currency.is_base() {
            return Ok(amount_idr as f64);
        }
        if !rate_to_idr.is_finite() || rate_to_idr <= 0.0 {
            return Err(ApiError::BadRequest(format!(
                "Invalid exchange rate for {}",
                currency
            )));
        }

        let factor = 10f64.powi(currency.minor_units() as i32);
        Ok((amount_idr as f64 / rate_to_idr * factor).round() / factor)
    }

    /// Amount in the smallest unit of `currency`, as charged by the gateway.
    pub fn to_minor_units(amount: f64, currency: CurrencyCode) -> i64 {
        let factor = 10f64.powi(currency.minor_units() as i32);
        (amount * factor).round() as i64
    }

    pub fn compute(
        items: &QuoteItems,
        markup_bps: i32,
        currency: CurrencyCode,
        rate_to_idr: f64,
    ) -> Result<QuotePricing, ApiError> {
        let subtotal_idr = Self::subtotal_idr(items)?;
        let markup_idr = Self::markup_idr(subtotal_idr, markup_bps)?;
        let total_price_idr = subtotal_idr.checked_add(markup_idr).ok_or_else(overflow)?;

        Ok(QuotePricing {
            subtotal_idr,
            markup_bps,
            markup_idr,
            total_price_idr,
            exchange_rate_snapshot: rate_to_idr,
            total_price_display: Self::convert_from_idr(total_price_idr, rate_to_idr, currency)?,
            priced_at: Some(Utc::now()),
        })
    }

    /// Zeroed totals that mark a quote as unpriced.
    pub fn unpriced(markup_bps: i32) -> QuotePricing {
        QuotePricing {
            subtotal_idr: 0,
            markup_bps,
            markup_idr: 0,
            total_price_idr: 0,
            exchange_rate_snapshot: 0.0,
            total_price_display: 0.0,
            priced_at: None,
        }
    }

    pub fn rate_to_idr(conn: &mut PgConnection, currency: CurrencyCode) -> Result<f64, ApiError> {
        if currency.is_base() {
            return Ok(1.0);
        }

        ExchangeRateRepository::find(conn, currency)?
            .map(|rate| rate.rate_to_idr)
            .ok_or_else(|| {
                ApiError::BadRequest(format!("No exchange rate available for {}", currency))
            })
    }

    /// Recomputes the quote from its stored line items and the current
    /// exchange rate, then snapshots the result on the quote.
    pub fn price_quote(conn: &mut PgConnection, quote: &Quote) -> Result<Quote, ApiError> {
        let items = QuoteItemRepository::load(conn, quote.id)?;
        let rate = Self::rate_to_idr(conn, quote.display_currency)?;
        let pricing = Self::compute(&items, quote.markup_bps, quote.display_currency, rate)?;

        let priced = QuoteRepository::set_pricing(conn, quote.id, &pricing)?;

        info!(
            quote_id = %priced.id,
            total_idr = priced.total_price_idr,
            currency = %priced.display_currency,
            "Quote priced"
        );

        Ok(priced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baliquote_primitives::models::entities::quote_items::{
        QuoteHotel, QuoteOption, QuoteTransport,
    };
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, d).unwrap()
    }

    fn hotel(check_in: u32, check_out: u32, rooms: i32, rate: i64) -> QuoteHotel {
        QuoteHotel {
            id: Uuid::new_v4(),
            quote_id: Uuid::nil(),
            hotel_name: "Alaya Resort Ubud".into(),
            room_type: None,
            check_in: date(check_in),
            check_out: date(check_out),
            rooms,
            rate_per_night_idr: rate,
            created_at: Utc::now(),
        }
    }

    fn transport(units: i32, rate: i64) -> QuoteTransport {
        QuoteTransport {
            id: Uuid::new_v4(),
            quote_id: Uuid::nil(),
            transport_type: "Private driver".into(),
            description: None,
            service_date: None,
            units,
            rate_idr: rate,
            created_at: Utc::now(),
        }
    }

    fn option(quantity: i32, price: i64, selected: bool) -> QuoteOption {
        QuoteOption {
            id: Uuid::new_v4(),
            quote_id: Uuid::nil(),
            quote_day_id: None,
            name: "Rafting".into(),
            description: None,
            unit_price_idr: price,
            quantity,
            is_selected: selected,
            created_at: Utc::now(),
        }
    }

    fn items() -> QuoteItems {
        QuoteItems {
            // 4 nights x 2 rooms x 1.5m
            hotels: vec![hotel(1, 5, 2, 1_500_000)],
            transports: vec![transport(3, 650_000)],
            days: vec![],
            options: vec![option(2, 450_000, true), option(2, 900_000, false)],
        }
    }

    #[test]
    fn subtotal_counts_nights_rooms_and_selected_options() {
        assert_eq!(
            PricingService::subtotal_idr(&items()).unwrap(),
            12_000_000 + 1_950_000 + 900_000
        );
    }

    #[test]
    fn markup_rounds_half_up() {
        // 1_005 * 15% = 150.75
        assert_eq!(PricingService::markup_idr(1_005, 1500).unwrap(), 151);
        // 10 * 5% = 0.5
        assert_eq!(PricingService::markup_idr(10, 500).unwrap(), 1);
        assert_eq!(PricingService::markup_idr(10, 400).unwrap(), 0);
        assert_eq!(PricingService::markup_idr(0, 1500).unwrap(), 0);
    }

    #[test]
    fn display_total_uses_currency_minor_units() {
        let usd = PricingService::convert_from_idr(14_850_000, 16_250.0, CurrencyCode::USD).unwrap();
        assert_eq!(usd, 913.85);

        let jpy = PricingService::convert_from_idr(1_000_000, 104.3, CurrencyCode::JPY).unwrap();
        assert_eq!(jpy, 9588.0);

        let idr = PricingService::convert_from_idr(1_000_000, 0.0, CurrencyCode::IDR).unwrap();
        assert_eq!(idr, 1_000_000.0);
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        assert!(PricingService::convert_from_idr(1_000, 0.0, CurrencyCode::AUD).is_err());
        assert!(PricingService::convert_from_idr(1_000, f64::NAN, CurrencyCode::AUD).is_err());
    }

    #[test]
    fn compute_snapshots_rate_and_totals() {
        let pricing =
            PricingService::compute(&items(), 1000, CurrencyCode::AUD, 10_500.0).unwrap();

        assert_eq!(pricing.subtotal_idr, 14_850_000);
        assert_eq!(pricing.markup_idr, 1_485_000);
        assert_eq!(pricing.total_price_idr, 16_335_000);
        assert_eq!(pricing.exchange_rate_snapshot, 10_500.0);
        assert_eq!(pricing.total_price_display, 1555.71);
        assert!(pricing.priced_at.is_some());
    }

    #[test]
    fn overflowing_lines_are_a_bad_request() {
        let mut items = items();
        items.transports.push(transport(365, i64::MAX / 10));

        let err = PricingService::subtotal_idr(&items).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn minor_units_for_gateway() {
        assert_eq!(PricingService::to_minor_units(913.85, CurrencyCode::USD), 91_385);
        assert_eq!(PricingService::to_minor_units(16_335_000.0, CurrencyCode::IDR), 16_335_000);
    }

    #[test]
    fn unpriced_clears_price_stamp() {
        let pricing = PricingService::unpriced(1500);
        assert_eq!(pricing.total_price_idr, 0);
        assert!(pricing.priced_at.is_none());
    }
}
