use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::entities::agent::{Agent, AgentChanges, NewAgent};
use baliquote_primitives::schema::agents;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

pub struct AgentRepository;

impl AgentRepository {
    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Agent>, ApiError> {
        agents::table
            .find(id)
            .select(Agent::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn get(conn: &mut PgConnection, id: Uuid) -> Result<Agent, ApiError> {
        Self::find_by_id(conn, id)?.ok_or_else(|| ApiError::NotFound("Agent not found".into()))
    }

    /// Inserts the profile once; a repeated onboarding returns the stored row.
    pub fn create(conn: &mut PgConnection, new_agent: NewAgent) -> Result<(Agent, bool), ApiError> {
        let inserted = diesel::insert_into(agents::table)
            .values(&new_agent)
            .on_conflict(agents::id)
            .do_nothing()
            .returning(Agent::as_returning())
            .get_result(conn)
            .optional()?;

        match inserted {
            Some(agent) => Ok((agent, true)),
            None => Ok((Self::get(conn, new_agent.id)?, false)),
        }
    }

    pub fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: &AgentChanges,
    ) -> Result<Agent, ApiError> {
        diesel::update(agents::table.find(id))
            .set((changes, agents::updated_at.eq(Utc::now())))
            .returning(Agent::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn set_approved(
        conn: &mut PgConnection,
        id: Uuid,
        approved: bool,
    ) -> Result<Agent, ApiError> {
        diesel::update(agents::table.find(id))
            .set((
                agents::is_approved.eq(approved),
                agents::updated_at.eq(Utc::now()),
            ))
            .returning(Agent::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("Agent not found".into()))
    }

    pub fn list(conn: &mut PgConnection, pending_only: bool) -> Result<Vec<Agent>, ApiError> {
        let mut query = agents::table.select(Agent::as_select()).into_boxed();

        if pending_only {
            query = query.filter(agents::is_approved.eq(false));
        }

        query
            .order(agents::created_at.desc())
            .load(conn)
            .map_err(ApiError::from)
    }
}
