use crate::models::entities::enum_types::{NotificationAudience, NotificationKind};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notification {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub audience: NotificationAudience,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification {
    pub agent_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub audience: NotificationAudience,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}
