use chrono::{Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};

/// Subtotal of `create_quote_body` line items in rupiah.
pub const FIXTURE_SUBTOTAL_IDR: i64 = 8_650_000;

pub fn random_client() -> Value {
    let full_name: String = Name().fake();
    let email: String = SafeEmail().fake();
    json!({ "full_name": full_name, "email": email })
}

/// Five-day Ubud trip a month out with one unselected option.
pub fn create_quote_body(client: Value, display_currency: &str) -> Value {
    let start = Utc::now().date_naive() + Duration::days(30);
    let end = start + Duration::days(5);

    json!({
        "client": client,
        "title": "Ubud rice terraces and spa",
        "start_date": start,
        "end_date": end,
        "num_adults": 2,
        "display_currency": display_currency,
        "items": {
            "hotels": [{
                "hotel_name": "Alaya Resort Ubud",
                "room_type": "Deluxe",
                "check_in": start,
                "check_out": start + Duration::days(2),
                "rooms": 1,
                "rate_per_night_idr": 2_750_000
            }],
            "transports": [{
                "transport_type": "Private car with driver",
                "units": 3,
                "rate_idr": 650_000
            }],
            "days": [{
                "day_number": 1,
                "title": "Arrival and Tegallalang",
                "options": [
                    { "name": "Jungle swing", "unit_price_idr": 450_000, "quantity": 2 },
                    { "name": "Helicopter tour", "unit_price_idr": 1_000_000, "quantity": 1, "is_selected": false }
                ]
            }],
            "extras": [
                { "name": "Airport fast track", "unit_price_idr": 300_000, "quantity": 1 }
            ]
        }
    })
}
