use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::entities::enum_types::NotificationAudience;
use baliquote_primitives::models::entities::notification::{NewNotification, Notification};
use baliquote_primitives::schema::notifications;
use diesel::prelude::*;
use uuid::Uuid;

pub struct NotificationRepository;

impl NotificationRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_notification: &NewNotification,
    ) -> Result<Notification, ApiError> {
        diesel::insert_into(notifications::table)
            .values(new_notification)
            .returning(Notification::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn create_many(
        conn: &mut PgConnection,
        batch: &[NewNotification],
    ) -> Result<usize, ApiError> {
        if batch.is_empty() {
            return Ok(0);
        }
        diesel::insert_into(notifications::table)
            .values(batch)
            .execute(conn)
            .map_err(ApiError::from)
    }

    pub fn list_for_agent(
        conn: &mut PgConnection,
        agent_id: Uuid,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, ApiError> {
        let mut query = notifications::table
            .filter(notifications::agent_id.eq(agent_id))
            .filter(notifications::audience.eq(NotificationAudience::Agent))
            .select(Notification::as_select())
            .into_boxed();

        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }

        query
            .order(notifications::created_at.desc())
            .limit(limit)
            .offset(offset)
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn count_unread_for_agent(
        conn: &mut PgConnection,
        agent_id: Uuid,
    ) -> Result<i64, ApiError> {
        notifications::table
            .filter(notifications::agent_id.eq(agent_id))
            .filter(notifications::audience.eq(NotificationAudience::Agent))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn list_for_admins(
        conn: &mut PgConnection,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, ApiError> {
        let mut query = notifications::table
            .filter(notifications::audience.eq(NotificationAudience::Admin))
            .select(Notification::as_select())
            .into_boxed();

        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }

        query
            .order(notifications::created_at.desc())
            .limit(limit)
            .offset(offset)
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn count_unread_for_admins(conn: &mut PgConnection) -> Result<i64, ApiError> {
        notifications::table
            .filter(notifications::audience.eq(NotificationAudience::Admin))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// Returns `false` when the notification is not in the reader's inbox.
    pub fn mark_read(
        conn: &mut PgConnection,
        id: Uuid,
        agent_id: Uuid,
        audience: NotificationAudience,
    ) -> Result<bool, ApiError> {
        let updated = match audience {
            NotificationAudience::Agent => diesel::update(
                notifications::table
                    .filter(notifications::id.eq(id))
                    .filter(notifications::audience.eq(audience))
                    .filter(notifications::agent_id.eq(agent_id)),
            )
            .set(notifications::is_read.eq(true))
            .execute(conn)?,
            NotificationAudience::Admin => diesel::update(
                notifications::table
                    .filter(notifications::id.eq(id))
                    .filter(notifications::audience.eq(audience)),
            )
            .set(notifications::is_read.eq(true))
            .execute(conn)?,
        };

        Ok(updated > 0)
    }
}
