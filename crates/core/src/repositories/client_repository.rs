use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::entities::client::{Client, ClientChanges, NewClient};
use baliquote_primitives::schema::{clients, quotes};
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

pub struct ClientRepository;

impl ClientRepository {
    pub fn find_by_id_and_agent(
        conn: &mut PgConnection,
        id: Uuid,
        agent_id: Uuid,
    ) -> Result<Option<Client>, ApiError> {
        clients::table
            .filter(clients::id.eq(id))
            .filter(clients::agent_id.eq(agent_id))
            .select(Client::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn get_for_agent(
        conn: &mut PgConnection,
        id: Uuid,
        agent_id: Uuid,
    ) -> Result<Client, ApiError> {
        Self::find_by_id_and_agent(conn, id, agent_id)?
            .ok_or_else(|| ApiError::NotFound("Client not found".into()))
    }

    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Client, ApiError> {
        clients::table
            .find(id)
            .select(Client::as_select())
            .first(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        agent_id: Uuid,
        email: &str,
    ) -> Result<Option<Client>, ApiError> {
        clients::table
            .filter(clients::agent_id.eq(agent_id))
            .filter(clients::email.eq(email))
            .select(Client::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn create(conn: &mut PgConnection, new_client: NewClient) -> Result<Client, ApiError> {
        diesel::insert_into(clients::table)
            .values(&new_client)
            .returning(Client::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// Reuses the agent's client with the same email. Returns `true` when a
    /// new row was inserted.
    pub fn find_or_create(
        conn: &mut PgConnection,
        new_client: NewClient,
    ) -> Result<(Client, bool), ApiError> {
        let inserted = diesel::insert_into(clients::table)
            .values(&new_client)
            .on_conflict((clients::agent_id, clients::email))
            .do_nothing()
            .returning(Client::as_returning())
            .get_result(conn)
            .optional()?;

        match inserted {
            Some(client) => Ok((client, true)),
            None => {
                let existing = Self::find_by_email(conn, new_client.agent_id, new_client.email)?
                    .ok_or_else(|| ApiError::Internal("Client vanished during upsert".into()))?;
                Ok((existing, false))
            }
        }
    }

    pub fn list(
        conn: &mut PgConnection,
        agent_id: Uuid,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Client>, ApiError> {
        let mut query = clients::table
            .filter(clients::agent_id.eq(agent_id))
            .select(Client::as_select())
            .into_boxed();

        if let Some(term) = search {
            let pattern = format!("%{}%", term);
            query = query.filter(
                clients::full_name
                    .ilike(pattern.clone())
                    .or(clients::email.ilike(pattern)),
            );
        }

        query
            .order(clients::full_name.asc())
            .limit(limit)
            .offset(offset)
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: &ClientChanges,
    ) -> Result<Client, ApiError> {
        diesel::update(clients::table.find(id))
            .set((changes, clients::updated_at.eq(Utc::now())))
            .returning(Client::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn count_quotes(conn: &mut PgConnection, id: Uuid) -> Result<i64, ApiError> {
        quotes::table
            .filter(quotes::client_id.eq(id))
            .count()
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<usize, ApiError> {
        diesel::delete(clients::table.find(id))
            .execute(conn)
            .map_err(ApiError::from)
    }
}
