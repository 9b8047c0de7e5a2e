use crate::app_state::AppState;
use crate::repositories::notification_repository::NotificationRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::services::notification_service::NotificationService;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::exchange_rate_dto::ExpireQuotesResponse;
use baliquote_primitives::models::entities::enum_types::{NotificationKind, QuoteStatus};
use chrono::Utc;
use diesel::prelude::*;
use tracing::info;

pub struct AutomationService;

impl AutomationService {
    /// Moves sent and approved quotes past `valid_until` to expired and
    /// tells their agents. Quotes with an unsettled payment wait for it.
    pub fn expire_quotes(state: &AppState) -> Result<ExpireQuotesResponse, ApiError> {
        let today = Utc::now().date_naive();
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let expired = conn.transaction::<_, ApiError, _>(|conn| {
            let due = QuoteRepository::find_expirable(conn, today)?;
            let mut notices = Vec::with_capacity(due.len());

            for quote in &due {
                let next = quote.status.transition(QuoteStatus::Expired)?;
                QuoteRepository::set_status(conn, quote.id, next)?;

                notices.push(NotificationService::for_agent(
                    quote.agent_id,
                    NotificationKind::QuoteExpired,
                    Some(quote.id),
                    None,
                    format!("Quote {} expired", quote.quote_number),
                    format!(
                        "\"{}\" was valid until {} and can no longer be paid",
                        quote.title, quote.valid_until
                    ),
                ));
            }

            NotificationRepository::create_many(conn, &notices)?;
            Ok(due.len())
        })?;

        if expired > 0 {
            info!(expired, "Expired overdue quotes");
        }

        Ok(ExpireQuotesResponse { expired })
    }
}
