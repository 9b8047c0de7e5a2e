use crate::handlers::{
    admin_agents::{__path_approve_agent, __path_list_agents, __path_revoke_agent},
    admin_notifications::__path_list_admin_notifications,
    admin_payments::{__path_approve_payment, __path_pending_payments, __path_reject_payment},
    agent_profile::{__path_current_agent, __path_onboard_agent, __path_update_current_agent},
    automation::__path_expire_quotes,
    clients::{
        __path_create_client, __path_delete_client, __path_get_client, __path_list_clients,
        __path_update_client,
    },
    exchange_rates::{__path_list_exchange_rates, __path_refresh_exchange_rates},
    gateway_webhook::__path_gateway_webhook,
    health::__path_health_check,
    manual_payment::__path_submit_manual_payment,
    notifications::{__path_list_notifications, __path_mark_notification_read},
    payment_intent::__path_create_payment_intent,
    payments::__path_get_payment,
    quote_actions::{
        __path_approve_quote, __path_list_quote_payments, __path_price_quote, __path_send_quote,
        __path_void_quote,
    },
    quote_pdf::__path_generate_quote_pdf,
    quotes::{
        __path_create_quote, __path_delete_quote, __path_get_quote, __path_list_quotes,
        __path_update_quote,
    },
};
use baliquote_primitives::error::ApiErrorResponse;
use baliquote_primitives::models::dtos::quote_dto::{LineItemsInput, QuoteDayInput};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bali Quote API",
        description = "Quotes, pricing and payments for travel agents selling Bali trips"
    ),
    paths(
        health_check,
        current_agent, onboard_agent, update_current_agent,
        list_clients, create_client, get_client, update_client, delete_client,
        list_quotes, create_quote, get_quote, update_quote, delete_quote,
        price_quote, send_quote, approve_quote, void_quote, list_quote_payments,
        generate_quote_pdf,
        create_payment_intent, submit_manual_payment, get_payment, gateway_webhook,
        list_notifications, mark_notification_read,
        list_exchange_rates,
        list_agents, approve_agent, revoke_agent,
        pending_payments, approve_payment, reject_payment,
        list_admin_notifications, refresh_exchange_rates, expire_quotes
    ),
    components(schemas(ApiErrorResponse, LineItemsInput, QuoteDayInput)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Agents", description = "Agent onboarding and profile"),
        (name = "Clients", description = "The agent's client book"),
        (name = "Quotes", description = "Trip quotes, pricing and lifecycle"),
        (name = "Payments", description = "Card and manual payments"),
        (name = "Notifications", description = "In-app notifications"),
        (name = "Exchange Rates", description = "Display currency rates"),
        (name = "Admin", description = "Agent approval, payment verification and maintenance")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_and_the_bearer_scheme() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/quotes/{quote_id}/send"));
        assert!(doc.paths.paths.contains_key("/api/payments/manual"));
        assert!(doc.paths.paths.contains_key("/api/admin/payments/{payment_id}/reject"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearerAuth"));
    }
}
