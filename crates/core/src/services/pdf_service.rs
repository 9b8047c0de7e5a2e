use crate::app_state::AppState;
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::quote_item_repository::{QuoteItemRepository, QuoteItems};
use crate::repositories::quote_repository::QuoteRepository;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::quote_dto::QuotePdfResponse;
use baliquote_primitives::models::entities::agent::Agent;
use baliquote_primitives::models::entities::client::Client;
use baliquote_primitives::models::entities::enum_types::{CurrencyCode, QuoteStatus};
use baliquote_primitives::models::entities::quote::Quote;
use std::fmt::Write;
use tracing::info;

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;color:#1f2933;margin:32px}\
h1{font-size:22px;margin:0}h2{font-size:15px;margin:24px 0 8px;color:#0f766e}\
table{width:100%;border-collapse:collapse;font-size:12px}\
th,td{padding:6px 8px;border-bottom:1px solid #e4e7eb;text-align:left}\
td.num,th.num{text-align:right}.muted{color:#7b8794;font-size:12px}\
.totals td{border:none}.grand td{font-weight:bold;font-size:14px}";

/// Everything printed on a quote document.
pub struct QuoteDocument<'a> {
    pub quote: &'a Quote,
    pub client: &'a Client,
    pub agent: &'a Agent,
    pub items: &'a QuoteItems,
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_idr(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!(
        "IDR {}{}",
        sign,
        group_thousands(&amount.unsigned_abs().to_string())
    )
}

pub fn format_amount(amount: f64, currency: CurrencyCode) -> String {
    let decimals = currency.minor_units() as usize;
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((w, f)) => (w.to_string(), Some(f.to_string())),
        None => (formatted, None),
    };

    let sign = if amount < 0.0 { "-" } else { "" };
    match fraction {
        Some(f) => format!("{} {}{}.{}", currency, sign, group_thousands(&whole), f),
        None => format!("{} {}{}", currency, sign, group_thousands(&whole)),
    }
}

pub struct PdfService;

impl PdfService {
    pub fn render_quote_html(doc: &QuoteDocument) -> Result<String, std::fmt::Error> {
        let q = doc.quote;
        let mut html = String::with_capacity(8 * 1024);

        write!(
            html,
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>",
            escape_html(&q.quote_number),
            STYLE
        )?;

        write!(
            html,
            "<h1>{}</h1><p class=\"muted\">Quote {} &middot; valid until {}</p>",
            escape_html(&q.title),
            escape_html(&q.quote_number),
            q.valid_until.format("%d %b %Y")
        )?;

        write!(
            html,
            "<table><tr><td><strong>Prepared for</strong><br>{}<br>{}</td>\
             <td><strong>Prepared by</strong><br>{}{}<br>{}</td>\
             <td><strong>Travel dates</strong><br>{} &ndash; {}<br>{} adult(s), {} child(ren)</td></tr></table>",
            escape_html(&doc.client.full_name),
            escape_html(&doc.client.email),
            escape_html(&doc.agent.full_name),
            doc.agent
                .company_name
                .as_deref()
                .map(|c| format!(", {}", escape_html(c)))
                .unwrap_or_default(),
            escape_html(&doc.agent.email),
            q.start_date.format("%d %b %Y"),
            q.end_date.format("%d %b %Y"),
            q.num_adults,
            q.num_children
        )?;

        let items = doc.items;

        if !items.days.is_empty() {
            html.push_str("<h2>Itinerary</h2><table>");
            for day in &items.days {
                write!(
                    html,
                    "<tr><td style=\"width:70px\"><strong>Day {}</strong>{}</td><td><strong>{}</strong>",
                    day.day_number,
                    day.day_date
                        .map(|d| format!("<br><span class=\"muted\">{}</span>", d.format("%a %d %b")))
                        .unwrap_or_default(),
                    escape_html(&day.title)
                )?;
                if let Some(description) = &day.description {
                    write!(html, "<br>{}", escape_html(description))?;
                }
                for option in items.options_for_day(day.id).iter().filter(|o| o.is_selected) {
                    write!(html, "<br>&bull; {}", escape_html(&option.name))?;
                }
                html.push_str("</td></tr>");
            }
            html.push_str("</table>");
        }

        if !items.hotels.is_empty() {
            html.push_str(
                "<h2>Accommodation</h2><table><tr><th>Hotel</th><th>Dates</th>\
                 <th class=\"num\">Nights</th><th class=\"num\">Rooms</th></tr>",
            );
            for hotel in &items.hotels {
                write!(
                    html,
                    "<tr><td>{}{}</td><td>{} &ndash; {}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
                    escape_html(&hotel.hotel_name),
                    hotel
                        .room_type
                        .as_deref()
                        .map(|r| format!("<br><span class=\"muted\">{}</span>", escape_html(r)))
                        .unwrap_or_default(),
                    hotel.check_in.format("%d %b"),
                    hotel.check_out.format("%d %b"),
                    hotel.nights(),
                    hotel.rooms
                )?;
            }
            html.push_str("</table>");
        }

        if !items.transports.is_empty() {
            html.push_str("<h2>Transport</h2><table>");
            for transport in &items.transports {
                write!(
                    html,
                    "<tr><td>{}</td><td>{}</td><td class=\"num\">&times; {}</td></tr>",
                    escape_html(&transport.transport_type),
                    transport
                        .description
                        .as_deref()
                        .map(escape_html)
                        .unwrap_or_default(),
                    transport.units
                )?;
            }
            html.push_str("</table>");
        }

        let extras: Vec<_> = items.extras().into_iter().filter(|o| o.is_selected).collect();
        if !extras.is_empty() {
            html.push_str("<h2>Extras</h2><table>");
            for extra in &extras {
                write!(
                    html,
                    "<tr><td>{}</td><td class=\"num\">&times; {}</td></tr>",
                    escape_html(&extra.name),
                    extra.quantity
                )?;
            }
            html.push_str("</table>");
        }

        html.push_str("<h2>Price</h2><table class=\"totals\">");
        write!(
            html,
            "<tr class=\"grand\"><td>Total</td><td class=\"num\">{}</td></tr>",
            format_idr(q.total_price_idr)
        )?;
        if !q.display_currency.is_base() && q.is_priced() {
            write!(
                html,
                "<tr><td class=\"muted\">Approximately</td><td class=\"num\">{}</td></tr>\
                 <tr><td class=\"muted\" colspan=\"2\">Rate used: 1 {} = {}</td></tr>",
                format_amount(q.total_price_display, q.display_currency),
                q.display_currency,
                format_amount(q.exchange_rate_snapshot, CurrencyCode::IDR)
            )?;
        }
        html.push_str("</table>");

        if let Some(notes) = &q.notes {
            write!(html, "<h2>Notes</h2><p>{}</p>", escape_html(notes))?;
        }

        html.push_str("</body></html>");
        Ok(html)
    }

    /// Renders the quote, stores the PDF and records its public URL.
    pub async fn generate_quote_pdf(
        state: &AppState,
        agent: &Agent,
        quote_id: uuid::Uuid,
    ) -> Result<QuotePdfResponse, ApiError> {
        let (quote, client, items) = {
            let mut conn = state
                .db
                .get()
                .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

            let quote = QuoteRepository::get_for_agent(&mut conn, quote_id, agent.id)?;
            if quote.status == QuoteStatus::Void {
                return Err(ApiError::BadRequest(
                    "Void quotes cannot be exported".into(),
                ));
            }
            if !quote.is_priced() {
                return Err(ApiError::BadRequest(
                    "Quote must be priced before export".into(),
                ));
            }

            let client = ClientRepository::find_by_id(&mut conn, quote.client_id)?;
            let items = QuoteItemRepository::load(&mut conn, quote.id)?;
            (quote, client, items)
        };

        let html = Self::render_quote_html(&QuoteDocument {
            quote: &quote,
            client: &client,
            agent,
            items: &items,
        })
        .map_err(|e| ApiError::Internal(format!("Quote rendering failed: {}", e)))?;

        let pdf = state.pdf.render_html(html).await?;

        let storage = &state.config.storage_details;
        let object_path = format!("{}/{}.pdf", agent.id, quote.quote_number);
        let pdf_url = state
            .storage
            .upload(&storage.pdf_bucket, &object_path, "application/pdf", pdf)
            .await?;

        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;
        QuoteRepository::set_pdf_url(&mut conn, quote.id, &pdf_url)?;

        info!(quote_id = %quote.id, %pdf_url, "Quote PDF generated");

        Ok(QuotePdfResponse {
            quote_id: quote.id,
            pdf_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baliquote_primitives::models::entities::enum_types::TripStatus;
    use baliquote_primitives::models::entities::quote_items::{QuoteDay, QuoteHotel, QuoteOption};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, d).unwrap()
    }

    fn fixture() -> (Quote, Client, Agent, QuoteItems) {
        let now = Utc::now();
        let agent = Agent {
            id: Uuid::new_v4(),
            email: "made@dewata.travel".into(),
            full_name: "Made Wirawan".into(),
            company_name: Some("Pulau Dewata Travel".into()),
            phone: None,
            is_approved: true,
            is_admin: false,
            default_markup_bps: None,
            created_at: now,
            updated_at: now,
        };
        let client = Client {
            id: Uuid::new_v4(),
            agent_id: agent.id,
            full_name: "Sarah <Tom> Thompson".into(),
            email: "sarah@example.com".into(),
            phone: None,
            nationality: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let quote = Quote {
            id: Uuid::new_v4(),
            quote_number: "Q-20261101-AB12CD".into(),
            agent_id: agent.id,
            client_id: client.id,
            title: "Ubud & Uluwatu".into(),
            status: QuoteStatus::Sent,
            trip_status: TripStatus::Planning,
            start_date: date(1),
            end_date: date(5),
            num_adults: 2,
            num_children: 0,
            subtotal_idr: 14_850_000,
            markup_bps: 1000,
            markup_idr: 1_485_000,
            total_price_idr: 16_335_000,
            display_currency: CurrencyCode::AUD,
            exchange_rate_snapshot: 10_500.0,
            total_price_display: 1555.71,
            priced_at: Some(now),
            valid_until: date(15),
            sent_at: Some(now),
            pdf_url: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let day_id = Uuid::new_v4();
        let items = QuoteItems {
            hotels: vec![QuoteHotel {
                id: Uuid::new_v4(),
                quote_id: quote.id,
                hotel_name: "Alaya Resort Ubud".into(),
                room_type: Some("Deluxe".into()),
                check_in: date(1),
                check_out: date(5),
                rooms: 1,
                rate_per_night_idr: 2_750_000,
                created_at: now,
            }],
            transports: vec![],
            days: vec![QuoteDay {
                id: day_id,
                quote_id: quote.id,
                day_number: 1,
                day_date: Some(date(1)),
                title: "Arrival".into(),
                description: None,
                created_at: now,
            }],
            options: vec![
                QuoteOption {
                    id: Uuid::new_v4(),
                    quote_id: quote.id,
                    quote_day_id: Some(day_id),
                    name: "Sunset dinner".into(),
                    description: None,
                    unit_price_idr: 900_000,
                    quantity: 2,
                    is_selected: true,
                    created_at: now,
                },
                QuoteOption {
                    id: Uuid::new_v4(),
                    quote_id: quote.id,
                    quote_day_id: Some(day_id),
                    name: "Helicopter tour".into(),
                    description: None,
                    unit_price_idr: 9_000_000,
                    quantity: 2,
                    is_selected: false,
                    created_at: now,
                },
            ],
        };
        (quote, client, agent, items)
    }

    #[test]
    fn amounts_are_grouped_per_currency() {
        assert_eq!(format_idr(16_335_000), "IDR 16,335,000");
        assert_eq!(format_idr(950), "IDR 950");
        assert_eq!(format_amount(1555.71, CurrencyCode::AUD), "AUD 1,555.71");
        assert_eq!(format_amount(9588.0, CurrencyCode::JPY), "JPY 9,588");
    }

    #[test]
    fn document_escapes_user_text_and_lists_selected_items() {
        let (quote, client, agent, items) = fixture();
        let html = PdfService::render_quote_html(&QuoteDocument {
            quote: &quote,
            client: &client,
            agent: &agent,
            items: &items,
        })
        .unwrap();

        assert!(html.contains("Sarah &lt;Tom&gt; Thompson"));
        assert!(html.contains("Ubud &amp; Uluwatu"));
        assert!(html.contains("Alaya Resort Ubud"));
        assert!(html.contains("Sunset dinner"));
        assert!(!html.contains("Helicopter tour"));
        assert!(html.contains("IDR 16,335,000"));
        assert!(html.contains("AUD 1,555.71"));
        assert!(html.contains("Pulau Dewata Travel"));
    }
}
