use crate::app_state::AppState;
use crate::repositories::notification_repository::NotificationRepository;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::notification_dto::{
    NotificationDto, NotificationListQuery, NotificationsResponse,
};
use baliquote_primitives::models::entities::agent::Agent;
use baliquote_primitives::models::entities::enum_types::{NotificationAudience, NotificationKind};
use baliquote_primitives::models::entities::notification::NewNotification;
use baliquote_primitives::utility::page_bounds;
use uuid::Uuid;

pub struct NotificationService;

impl NotificationService {
    pub fn for_agent(
        agent_id: Uuid,
        kind: NotificationKind,
        quote_id: Option<Uuid>,
        payment_id: Option<Uuid>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> NewNotification {
        NewNotification {
            agent_id,
            quote_id,
            payment_id,
            audience: NotificationAudience::Agent,
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Admin inbox entry; `agent_id` is the agent the event concerns.
    pub fn for_admins(
        agent_id: Uuid,
        kind: NotificationKind,
        quote_id: Option<Uuid>,
        payment_id: Option<Uuid>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> NewNotification {
        NewNotification {
            audience: NotificationAudience::Admin,
            ..Self::for_agent(agent_id, kind, quote_id, payment_id, title, message)
        }
    }

    pub fn list_for_agent(
        state: &AppState,
        agent_id: Uuid,
        query: NotificationListQuery,
    ) -> Result<NotificationsResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let (limit, offset) = page_bounds(query.limit, query.offset);

        let notifications = NotificationRepository::list_for_agent(
            &mut conn,
            agent_id,
            query.unread_only.unwrap_or(false),
            limit,
            offset,
        )?;
        let unread = NotificationRepository::count_unread_for_agent(&mut conn, agent_id)?;

        Ok(NotificationsResponse {
            notifications: notifications.into_iter().map(NotificationDto::from).collect(),
            unread,
        })
    }

    pub fn list_for_admins(
        state: &AppState,
        query: NotificationListQuery,
    ) -> Result<NotificationsResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let (limit, offset) = page_bounds(query.limit, query.offset);

        let notifications = NotificationRepository::list_for_admins(
            &mut conn,
            query.unread_only.unwrap_or(false),
            limit,
            offset,
        )?;
        let unread = NotificationRepository::count_unread_for_admins(&mut conn)?;

        Ok(NotificationsResponse {
            notifications: notifications.into_iter().map(NotificationDto::from).collect(),
            unread,
        })
    }

    /// Admins may also clear entries from the shared admin inbox.
    pub fn mark_read(state: &AppState, reader: &Agent, id: Uuid) -> Result<(), ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let mut updated =
            NotificationRepository::mark_read(&mut conn, id, reader.id, NotificationAudience::Agent)?;

        if !updated && reader.is_admin {
            updated = NotificationRepository::mark_read(
                &mut conn,
                id,
                reader.id,
                NotificationAudience::Admin,
            )?;
        }

        if !updated {
            return Err(ApiError::NotFound("Notification not found".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_entries_keep_the_concerned_agent() {
        let agent_id = Uuid::new_v4();
        let n = NotificationService::for_admins(
            agent_id,
            NotificationKind::ManualPaymentSubmitted,
            None,
            None,
            "Payment proof submitted",
            "Check the transfer",
        );

        assert_eq!(n.agent_id, agent_id);
        assert_eq!(n.audience, NotificationAudience::Admin);
        assert_eq!(n.title, "Payment proof submitted");
    }
}
