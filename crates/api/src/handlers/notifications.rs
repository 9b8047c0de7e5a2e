use axum::extract::{Extension, Json, Path, Query, State};
use axum::http::StatusCode;
use baliquote_core::services::notification_service::NotificationService;
use baliquote_core::{AppState, CurrentAgent};
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::notification_dto::{
    NotificationListQuery, NotificationsResponse,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    summary = "The agent's notifications",
    operation_id = "listNotifications",
    params(NotificationListQuery),
    responses(
        (status = 200, description = "Notifications, newest first, with the unread count", body = NotificationsResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    Ok(Json(NotificationService::list_for_agent(&state, agent.id(), query)?))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{notification_id}/read",
    tag = "Notifications",
    summary = "Mark a notification as read",
    description = "Admins may also mark notifications from the admin inbox.",
    operation_id = "markNotificationRead",
    params(("notification_id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Marked as read"),
        (status = 404, description = "Notification not found", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    Extension(agent): Extension<CurrentAgent>,
    Path(notification_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    NotificationService::mark_read(&state, &agent.0, notification_id)?;
    Ok(StatusCode::NO_CONTENT)
}
