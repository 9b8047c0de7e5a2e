use crate::app_state::AppState;
use crate::repositories::agent_repository::AgentRepository;
use crate::repositories::notification_repository::NotificationRepository;
use crate::security::Claims;
use crate::services::notification_service::NotificationService;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::agent_dto::{
    AgentDto, AgentsResponse, OnboardAgentRequest, UpdateAgentRequest,
};
use baliquote_primitives::models::entities::agent::{Agent, AgentChanges, NewAgent};
use baliquote_primitives::models::entities::enum_types::NotificationKind;
use baliquote_primitives::utility::{clean_optional, normalize_email, percent_to_bps};
use diesel::prelude::*;
use tracing::info;
use uuid::Uuid;

pub struct AgentService;

impl AgentService {
    /// Creates the agent profile for the token's subject. New agents wait for
    /// admin approval. Returns `true` when the profile was created.
    pub fn onboard(
        state: &AppState,
        claims: &Claims,
        req: OnboardAgentRequest,
    ) -> Result<(AgentDto, bool), ApiError> {
        let agent_id = claims.user_id()?;
        let email = claims
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Session token carries no email".into()))?;

        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let company_name = clean_optional(req.company_name);
        let phone = clean_optional(req.phone);

        let (agent, created) = AgentRepository::create(
            &mut conn,
            NewAgent {
                id: agent_id,
                email: &email,
                full_name: req.full_name.trim(),
                company_name: company_name.as_deref(),
                phone: phone.as_deref(),
                default_markup_bps: req.default_markup_percent.map(percent_to_bps),
            },
        )?;

        if created {
            info!(agent_id = %agent.id, "Agent onboarded, awaiting approval");
        }

        Ok((agent.into(), created))
    }

    pub fn current(state: &AppState, claims: &Claims) -> Result<AgentDto, ApiError> {
        let agent_id = claims.user_id()?;
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        AgentRepository::find_by_id(&mut conn, agent_id)?
            .map(AgentDto::from)
            .ok_or_else(|| ApiError::NotFound("Agent profile not found".into()))
    }

    pub fn update_current(
        state: &AppState,
        claims: &Claims,
        req: UpdateAgentRequest,
    ) -> Result<AgentDto, ApiError> {
        let agent_id = claims.user_id()?;
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        AgentRepository::get(&mut conn, agent_id)?;

        let changes = AgentChanges {
            full_name: req.full_name.map(|n| n.trim().to_string()),
            company_name: clean_optional(req.company_name),
            phone: clean_optional(req.phone),
            default_markup_bps: req.default_markup_percent.map(percent_to_bps),
        };

        Ok(AgentRepository::update(&mut conn, agent_id, &changes)?.into())
    }

    pub fn list(state: &AppState, pending_only: bool) -> Result<AgentsResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let agents = AgentRepository::list(&mut conn, pending_only)?;

        Ok(AgentsResponse {
            agents: agents.into_iter().map(AgentDto::from).collect(),
        })
    }

    pub fn approve(state: &AppState, admin: &Agent, agent_id: Uuid) -> Result<AgentDto, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let agent = conn.transaction::<_, ApiError, _>(|conn| {
            let existing = AgentRepository::get(conn, agent_id)?;
            if existing.is_approved {
                return Ok(existing);
            }

            let agent = AgentRepository::set_approved(conn, agent_id, true)?;

            NotificationRepository::create(
                conn,
                &NotificationService::for_agent(
                    agent.id,
                    NotificationKind::AgentApproved,
                    None,
                    None,
                    "Account approved",
                    "Your agent account is approved. You can now create quotes.",
                ),
            )?;

            Ok(agent)
        })?;

        info!(agent_id = %agent.id, admin_id = %admin.id, "Agent approved");
        Ok(agent.into())
    }

    pub fn revoke(state: &AppState, admin: &Agent, agent_id: Uuid) -> Result<AgentDto, ApiError> {
        if admin.id == agent_id {
            return Err(ApiError::BadRequest(
                "Admins cannot revoke their own access".into(),
            ));
        }

        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let agent = AgentRepository::set_approved(&mut conn, agent_id, false)?;

        info!(agent_id = %agent.id, admin_id = %admin.id, "Agent approval revoked");
        Ok(agent.into())
    }
}
