use crate::models::entities::agent::Agent;
use crate::utility::{bps_to_percent, validate_not_blank, validate_phone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OnboardAgentRequest {
    #[schema(example = "Made Wirawan")]
    #[validate(length(min = 2, max = 120), custom(function = "validate_not_blank"))]
    pub full_name: String,

    #[schema(example = "Pulau Dewata Travel")]
    #[validate(length(max = 160))]
    pub company_name: Option<String>,

    #[schema(example = "+62 812 3456 7890")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[schema(example = 15.0)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub default_markup_percent: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAgentRequest {
    #[validate(length(min = 2, max = 120), custom(function = "validate_not_blank"))]
    pub full_name: Option<String>,

    #[validate(length(max = 160))]
    pub company_name: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub default_markup_percent: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgentDto {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub is_approved: bool,
    pub is_admin: bool,
    pub default_markup_percent: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<Agent> for AgentDto {
    fn from(agent: Agent) -> Self {
        Self {
            id: agent.id,
            email: agent.email,
            full_name: agent.full_name,
            company_name: agent.company_name,
            phone: agent.phone,
            is_approved: agent.is_approved,
            is_admin: agent.is_admin,
            default_markup_percent: agent.default_markup_bps.map(bps_to_percent),
            created_at: agent.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgentsResponse {
    pub agents: Vec<AgentDto>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AgentListQuery {
    /// Only agents still waiting for approval
    pub pending_only: Option<bool>,
}
