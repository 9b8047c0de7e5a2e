use axum::{extract::State, http::StatusCode, Json};
use baliquote_core::AppState;
use baliquote_primitives::models::dtos::health_dto::HealthStatus;
use diesel::prelude::*;
use std::sync::Arc;
use tracing::error;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    summary = "Health check endpoint",
    description = "Reports whether the API can serve requests. \
                   Returns 200 OK when the database answers a trivial query and \
                   503 Service Unavailable otherwise. \
                   This endpoint is **public** (no authentication required).",
    operation_id = "healthCheck",
    responses(
        ( status = 200, description = "Service is healthy", body = HealthStatus),
        ( status = 503, description = "Database unreachable", body = HealthStatus),
    ),
    security(()),
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthStatus>) {
    let probe = state
        .db
        .get()
        .map_err(|e| e.to_string())
        .and_then(|mut conn| {
            diesel::sql_query("SELECT 1")
                .execute(&mut conn)
                .map_err(|e| e.to_string())
        });

    match probe {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "ok".to_string(),
                message: "API is healthy".to_string(),
            }),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    status: "unavailable".to_string(),
                    message: "Database is unreachable".to_string(),
                }),
            )
        }
    }
}
