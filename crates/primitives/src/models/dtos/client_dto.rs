use crate::models::entities::client::Client;
use crate::utility::{validate_not_blank, validate_phone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClientRequest {
    #[schema(example = "Sarah Thompson")]
    #[validate(length(min = 1, max = 160), custom(function = "validate_not_blank"))]
    pub full_name: String,

    #[schema(example = "sarah@example.com")]
    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = 80))]
    pub nationality: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 160), custom(function = "validate_not_blank"))]
    pub full_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = 80))]
    pub nationality: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            full_name: client.full_name,
            email: client.email,
            phone: client.phone,
            nationality: client.nationality,
            notes: client.notes,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientsResponse {
    pub clients: Vec<ClientDto>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ClientListQuery {
    /// Case-insensitive match on name or email
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
