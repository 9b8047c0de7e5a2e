use crate::app_state::AppState;
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::notification_repository::NotificationRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::quote_item_repository::QuoteItemRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::services::notification_service::NotificationService;
use crate::services::pricing_service::PricingService;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::client_dto::ClientDto;
use baliquote_primitives::models::dtos::quote_dto::{
    CreateQuoteRequest, QuoteDayDto, QuoteDetailResponse, QuoteDto, QuoteListQuery,
    QuotesResponse, UpdateQuoteRequest,
};
use baliquote_primitives::models::entities::agent::Agent;
use baliquote_primitives::models::entities::client::NewClient;
use baliquote_primitives::models::entities::enum_types::{NotificationKind, QuoteStatus};
use baliquote_primitives::models::entities::quote::{NewQuote, Quote, QuoteChanges};
use baliquote_primitives::utility::{clean_optional, normalize_email, page_bounds, percent_to_bps};
use chrono::{Duration, NaiveDate, Utc};
use diesel::prelude::*;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

const QUOTE_SUFFIX_LEN: usize = 6;

pub struct QuoteService;

impl QuoteService {
    /// `Q-YYYYMMDD-XXXXXX` with an upper-case alphanumeric suffix.
    pub fn generate_quote_number(today: NaiveDate) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(QUOTE_SUFFIX_LEN)
            .map(|b| (b as char).to_ascii_uppercase())
            .collect();

        format!("Q-{}-{}", today.format("%Y%m%d"), suffix)
    }

    /// Markup precedence: request, then agent default, then platform default.
    pub fn resolve_markup_bps(
        requested_percent: Option<f64>,
        agent: &Agent,
        platform_default_bps: i32,
    ) -> i32 {
        requested_percent
            .map(percent_to_bps)
            .or(agent.default_markup_bps)
            .unwrap_or(platform_default_bps)
    }

    pub fn create_quote(
        state: &AppState,
        agent: &Agent,
        req: CreateQuoteRequest,
    ) -> Result<QuoteDetailResponse, ApiError> {
        let today = Utc::now().date_naive();
        let valid_until = req
            .valid_until
            .unwrap_or(today + Duration::days(state.config.quote_validity_days));

        if valid_until < today {
            return Err(ApiError::BadRequest(
                "valid_until cannot be in the past".into(),
            ));
        }

        let markup_bps =
            Self::resolve_markup_bps(req.markup_percent, agent, state.config.default_markup_bps);
        let quote_number = Self::generate_quote_number(today);
        let notes = clean_optional(req.notes.clone());

        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let quote = conn.transaction::<_, ApiError, _>(|conn| {
            let email = normalize_email(&req.client.email);
            let phone = clean_optional(req.client.phone.clone());

            let (client, created) = ClientRepository::find_or_create(
                conn,
                NewClient {
                    agent_id: agent.id,
                    full_name: req.client.full_name.trim(),
                    email: &email,
                    phone: phone.as_deref(),
                    nationality: None,
                    notes: None,
                },
            )?;

            if created {
                info!(client_id = %client.id, "Client created from quote");
            }

            let quote = QuoteRepository::create(
                conn,
                NewQuote {
                    quote_number: &quote_number,
                    agent_id: agent.id,
                    client_id: client.id,
                    title: req.title.trim(),
                    start_date: req.start_date,
                    end_date: req.end_date,
                    num_adults: req.num_adults,
                    num_children: req.num_children,
                    markup_bps,
                    display_currency: req.display_currency,
                    valid_until,
                    notes: notes.as_deref(),
                },
            )?;

            QuoteItemRepository::insert_all(conn, quote.id, &req.items)?;

            Ok(quote)
        })?;

        info!(quote_id = %quote.id, quote_number = %quote.quote_number, "Quote created");

        // An unpriceable quote is still saved; the agent can reprice later.
        let quote = match PricingService::price_quote(&mut conn, &quote) {
            Ok(priced) => priced,
            Err(e) => {
                warn!(quote_id = %quote.id, "Quote left unpriced: {}", e);
                quote
            }
        };

        Self::detail(&mut conn, quote)
    }

    pub fn get_quote(
        state: &AppState,
        agent_id: Uuid,
        id: Uuid,
    ) -> Result<QuoteDetailResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let quote = QuoteRepository::get_for_agent(&mut conn, id, agent_id)?;
        Self::detail(&mut conn, quote)
    }

    pub fn list_quotes(
        state: &AppState,
        agent_id: Uuid,
        query: QuoteListQuery,
    ) -> Result<QuotesResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let quotes = QuoteRepository::list(
            &mut conn,
            agent_id,
            query.status,
            query.client_id,
            limit,
            offset,
        )?;

        Ok(QuotesResponse {
            quotes: quotes.into_iter().map(QuoteDto::from).collect(),
        })
    }

    /// Editing a sent quote pulls it back to draft. Items, when given,
    /// replace the stored ones and the quote is repriced. Quotes with an
    /// unsettled payment are frozen.
    pub fn update_quote(
        state: &AppState,
        agent_id: Uuid,
        id: Uuid,
        req: UpdateQuoteRequest,
    ) -> Result<QuoteDetailResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let quote = conn.transaction::<_, ApiError, _>(|conn| {
            let current = QuoteRepository::lock_for_agent(conn, id, agent_id)?;

            if !current.status.is_editable() {
                return Err(ApiError::InvalidTransition(format!(
                    "Quote cannot be edited while {}",
                    current.status
                )));
            }

            if PaymentRepository::has_in_flight(conn, id)? {
                return Err(ApiError::Conflict(
                    "Quote has a payment awaiting settlement and cannot be edited".into(),
                ));
            }

            if let Some(valid_until) = req.valid_until {
                if valid_until < Utc::now().date_naive() {
                    return Err(ApiError::BadRequest(
                        "valid_until cannot be in the past".into(),
                    ));
                }
            }

            let start_date = req.start_date.unwrap_or(current.start_date);
            let end_date = req.end_date.unwrap_or(current.end_date);
            if end_date < start_date {
                return Err(ApiError::BadRequest(
                    "end_date must not be before start_date".into(),
                ));
            }

            if let Some(client_id) = req.client_id {
                ClientRepository::get_for_agent(conn, client_id, agent_id)?;
            }

            let changes = QuoteChanges {
                client_id: req.client_id,
                title: req.title.as_ref().map(|t| t.trim().to_string()),
                start_date: req.start_date,
                end_date: req.end_date,
                num_adults: req.num_adults,
                num_children: req.num_children,
                markup_bps: req.markup_percent.map(percent_to_bps),
                display_currency: req.display_currency,
                valid_until: req.valid_until,
                notes: clean_optional(req.notes.clone()),
            };

            let mut quote = QuoteRepository::update(conn, id, &changes)?;

            if let Some(items) = &req.items {
                QuoteItemRepository::delete_all(conn, id)?;
                QuoteItemRepository::insert_all(conn, id, items)?;
            }

            if quote.status == QuoteStatus::Sent {
                let next = quote.status.transition(QuoteStatus::Draft)?;
                quote = QuoteRepository::set_status(conn, id, next)?;
            }

            Ok(quote)
        })?;

        let quote = match PricingService::price_quote(&mut conn, &quote) {
            Ok(priced) => priced,
            Err(e) => {
                warn!(quote_id = %quote.id, "Quote unpriced after edit: {}", e);
                QuoteRepository::set_pricing(
                    &mut conn,
                    quote.id,
                    &PricingService::unpriced(quote.markup_bps),
                )?
            }
        };

        Self::detail(&mut conn, quote)
    }

    pub fn delete_quote(state: &AppState, agent_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        conn.transaction::<_, ApiError, _>(|conn| {
            let quote = QuoteRepository::lock_for_agent(conn, id, agent_id)?;

            if quote.status != QuoteStatus::Draft {
                return Err(ApiError::BadRequest(
                    "Only draft quotes can be deleted, void it instead".into(),
                ));
            }

            QuoteRepository::delete(conn, id)?;
            Ok(())
        })?;

        info!(quote_id = %id, "Quote deleted");
        Ok(())
    }

    /// Explicit repricing; unlike creation, failures are reported.
    pub fn reprice_quote(
        state: &AppState,
        agent_id: Uuid,
        id: Uuid,
    ) -> Result<QuoteDetailResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let quote = conn.transaction::<_, ApiError, _>(|conn| {
            let quote = QuoteRepository::lock_for_agent(conn, id, agent_id)?;

            if !quote.status.is_editable() {
                return Err(ApiError::InvalidTransition(format!(
                    "Quote cannot be repriced while {}",
                    quote.status
                )));
            }

            PricingService::price_quote(conn, &quote)
        })?;

        Self::detail(&mut conn, quote)
    }

    pub fn send_quote(
        state: &AppState,
        agent_id: Uuid,
        id: Uuid,
    ) -> Result<QuoteDetailResponse, ApiError> {
        let today = Utc::now().date_naive();
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let quote = conn.transaction::<_, ApiError, _>(|conn| {
            let quote = QuoteRepository::lock_for_agent(conn, id, agent_id)?;
            quote.status.transition(QuoteStatus::Sent)?;

            if !quote.is_priced() || quote.total_price_idr <= 0 {
                return Err(ApiError::BadRequest(
                    "Quote must be priced before it is sent".into(),
                ));
            }
            if quote.valid_until < today {
                return Err(ApiError::BadRequest(
                    "Quote validity has already ended, extend valid_until first".into(),
                ));
            }

            let sent = QuoteRepository::mark_sent(conn, id)?;

            NotificationRepository::create(
                conn,
                &NotificationService::for_agent(
                    agent_id,
                    NotificationKind::QuoteSent,
                    Some(sent.id),
                    None,
                    format!("Quote {} sent", sent.quote_number),
                    format!(
                        "\"{}\" was sent and is valid until {}",
                        sent.title, sent.valid_until
                    ),
                ),
            )?;

            Ok(sent)
        })?;

        info!(quote_id = %quote.id, "Quote sent");
        Self::detail(&mut conn, quote)
    }

    pub fn approve_quote(
        state: &AppState,
        agent_id: Uuid,
        id: Uuid,
    ) -> Result<QuoteDetailResponse, ApiError> {
        Self::move_to(state, agent_id, id, QuoteStatus::Approved)
    }

    pub fn void_quote(
        state: &AppState,
        agent_id: Uuid,
        id: Uuid,
    ) -> Result<QuoteDetailResponse, ApiError> {
        Self::move_to(state, agent_id, id, QuoteStatus::Void)
    }

    fn move_to(
        state: &AppState,
        agent_id: Uuid,
        id: Uuid,
        next: QuoteStatus,
    ) -> Result<QuoteDetailResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let quote = conn.transaction::<_, ApiError, _>(|conn| {
            let quote = QuoteRepository::lock_for_agent(conn, id, agent_id)?;
            let next = quote.status.transition(next)?;
            QuoteRepository::set_status(conn, id, next)
        })?;

        info!(quote_id = %quote.id, status = %quote.status, "Quote status changed");
        Self::detail(&mut conn, quote)
    }

    pub fn detail(conn: &mut PgConnection, quote: Quote) -> Result<QuoteDetailResponse, ApiError> {
        let client = ClientRepository::find_by_id(conn, quote.client_id)?;
        let items = QuoteItemRepository::load(conn, quote.id)?;

        let extras = items.extras();
        let days = items
            .days
            .iter()
            .map(|day| QuoteDayDto {
                options: items.options_for_day(day.id),
                day: day.clone(),
            })
            .collect();

        Ok(QuoteDetailResponse {
            quote: quote.into(),
            client: ClientDto::from(client),
            hotels: items.hotels,
            transports: items.transports,
            days,
            extras,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(default_markup_bps: Option<i32>) -> Agent {
        Agent {
            id: Uuid::new_v4(),
            email: "agent@example.com".into(),
            full_name: "Made Wirawan".into(),
            company_name: None,
            phone: None,
            is_approved: true,
            is_admin: false,
            default_markup_bps,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn quote_number_has_date_and_suffix() {
        let date = NaiveDate::from_ymd_opt(2026, 11, 3).unwrap();
        let number = QuoteService::generate_quote_number(date);

        assert!(number.starts_with("Q-20261103-"));
        let suffix = &number["Q-20261103-".len()..];
        assert_eq!(suffix.len(), QUOTE_SUFFIX_LEN);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn markup_prefers_request_then_agent_then_platform() {
        assert_eq!(
            QuoteService::resolve_markup_bps(Some(12.5), &agent(Some(2000)), 1500),
            1250
        );
        assert_eq!(
            QuoteService::resolve_markup_bps(None, &agent(Some(2000)), 1500),
            2000
        );
        assert_eq!(QuoteService::resolve_markup_bps(None, &agent(None), 1500), 1500);
    }
}
