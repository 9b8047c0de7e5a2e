use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    admin_agents::{approve_agent, list_agents, revoke_agent},
    admin_notifications::list_admin_notifications,
    admin_payments::{approve_payment, pending_payments, reject_payment},
    agent_profile::{current_agent, onboard_agent, update_current_agent},
    automation::expire_quotes,
    clients::{create_client, delete_client, get_client, list_clients, update_client},
    exchange_rates::{list_exchange_rates, refresh_exchange_rates},
    gateway_webhook::gateway_webhook,
    health::health_check,
    manual_payment::submit_manual_payment,
    notifications::{list_notifications, mark_notification_read},
    payment_intent::create_payment_intent,
    payments::get_payment,
    quote_actions::{approve_quote, list_quote_payments, price_quote, send_quote, void_quote},
    quote_pdf::generate_quote_pdf,
    quotes::{create_quote, delete_quote, get_quote, list_quotes, update_quote},
};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, response::IntoResponse, Router};
use baliquote_core::{AppState, SecurityConfig};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const JSON_BODY_LIMIT: usize = 2 * 1024 * 1024;
/// Room for multipart boundaries and the text fields around the proof file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let public_router = create_public_routers();
    let profile_router = create_profile_routers(&state);
    let agent_router = create_agent_routers(&state);
    let admin_router = create_admin_routers(&state);

    let mut router = Router::new()
        .merge(public_router)
        .merge(profile_router)
        .merge(agent_router)
        .merge(admin_router)
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(middleware::from_fn(https_redirect_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http()),
        );

    // the key extractor needs the peer address, which test clients do not provide
    if std::env::var("APP_ENV").unwrap_or_default() != "test" {
        match GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(10)
            .finish()
        {
            Some(governor_conf) => {
                router = router.layer(GovernorLayer::new(Arc::new(governor_conf)))
            }
            None => warn!("Invalid rate limit configuration, rate limiting disabled"),
        }
    }

    router.with_state(state)
}

fn create_public_routers() -> Router<Arc<AppState>> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(health_check))
        .route("/api/payments/webhook", post(gateway_webhook))
}

/// Token only: the profile must be reachable before the agent exists or is approved.
fn create_profile_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/agents/me",
            get(current_agent)
                .post(onboard_agent)
                .patch(update_current_agent),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::auth_middleware,
        ))
}

fn create_agent_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let max_upload = state.config.storage_details.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/api/clients", get(list_clients).post(create_client))
        .route(
            "/api/clients/{client_id}",
            get(get_client).patch(update_client).delete(delete_client),
        )
        .route("/api/quotes", get(list_quotes).post(create_quote))
        .route(
            "/api/quotes/{quote_id}",
            get(get_quote).patch(update_quote).delete(delete_quote),
        )
        .route("/api/quotes/{quote_id}/price", post(price_quote))
        .route("/api/quotes/{quote_id}/send", post(send_quote))
        .route("/api/quotes/{quote_id}/approve", post(approve_quote))
        .route("/api/quotes/{quote_id}/void", post(void_quote))
        .route("/api/quotes/{quote_id}/pdf", post(generate_quote_pdf))
        .route("/api/quotes/{quote_id}/payments", get(list_quote_payments))
        .route("/api/payments/intent", post(create_payment_intent))
        .route(
            "/api/payments/manual",
            post(submit_manual_payment).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/api/payments/{payment_id}", get(get_payment))
        .route("/api/notifications", get(list_notifications))
        .route(
            "/api/notifications/{notification_id}/read",
            post(mark_notification_read),
        )
        .route("/api/exchange-rates", get(list_exchange_rates))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::agent_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::auth_middleware,
        ))
}

fn create_admin_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/agents", get(list_agents))
        .route("/api/admin/agents/{agent_id}/approve", post(approve_agent))
        .route("/api/admin/agents/{agent_id}/revoke", post(revoke_agent))
        .route("/api/admin/payments/pending", get(pending_payments))
        .route(
            "/api/admin/payments/{payment_id}/approve",
            post(approve_payment),
        )
        .route(
            "/api/admin/payments/{payment_id}/reject",
            post(reject_payment),
        )
        .route("/api/admin/notifications", get(list_admin_notifications))
        .route(
            "/api/admin/exchange-rates/refresh",
            post(refresh_exchange_rates),
        )
        .route(
            "/api/admin/automation/expire-quotes",
            post(expire_quotes),
        )
        .route_layer(middleware::from_fn(SecurityConfig::admin_middleware))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::agent_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::auth_middleware,
        ))
}

async fn https_redirect_middleware(
    req: axum::extract::Request,
    next: middleware::Next,
) -> axum::response::Response {
    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

    if env == "production" {
        let headers = req.headers();
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok());

        if let Some("http") = proto {
            let host = headers
                .get("host")
                .and_then(|h| h.to_str().ok())
                .unwrap_or("localhost");

            let path_and_query = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("");

            return axum::response::Redirect::permanent(&format!(
                "https://{}{}",
                host, path_and_query
            ))
            .into_response();
        }
    }

    next.run(req).await
}
