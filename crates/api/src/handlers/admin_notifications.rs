use axum::extract::{Json, Query, State};
use baliquote_core::services::notification_service::NotificationService;
use baliquote_core::AppState;
use baliquote_primitives::error::{ApiError, ApiErrorResponse};
use baliquote_primitives::models::dtos::notification_dto::{
    NotificationListQuery, NotificationsResponse,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/admin/notifications",
    tag = "Admin",
    summary = "Admin inbox",
    operation_id = "adminListNotifications",
    params(NotificationListQuery),
    responses(
        (status = 200, description = "Admin notifications", body = NotificationsResponse),
        (status = 403, description = "Admin access required", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn list_admin_notifications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    Ok(Json(NotificationService::list_for_admins(&state, query)?))
}
