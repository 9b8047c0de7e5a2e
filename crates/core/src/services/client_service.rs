use crate::app_state::AppState;
use crate::repositories::client_repository::ClientRepository;
use baliquote_primitives::error::ApiError;
use baliquote_primitives::models::dtos::client_dto::{
    ClientDto, ClientListQuery, ClientsResponse, CreateClientRequest, UpdateClientRequest,
};
use baliquote_primitives::models::entities::client::{ClientChanges, NewClient};
use baliquote_primitives::utility::{clean_optional, normalize_email, page_bounds};
use tracing::info;
use uuid::Uuid;

pub struct ClientService;

impl ClientService {
    pub fn list(
        state: &AppState,
        agent_id: Uuid,
        query: ClientListQuery,
    ) -> Result<ClientsResponse, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let search = clean_optional(query.search);

        let clients =
            ClientRepository::list(&mut conn, agent_id, search.as_deref(), limit, offset)?;

        Ok(ClientsResponse {
            clients: clients.into_iter().map(ClientDto::from).collect(),
        })
    }

    pub fn create(
        state: &AppState,
        agent_id: Uuid,
        req: CreateClientRequest,
    ) -> Result<ClientDto, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let email = normalize_email(&req.email);
        if ClientRepository::find_by_email(&mut conn, agent_id, &email)?.is_some() {
            return Err(ApiError::Conflict(
                "A client with this email already exists".into(),
            ));
        }

        let phone = clean_optional(req.phone);
        let nationality = clean_optional(req.nationality);
        let notes = clean_optional(req.notes);

        let client = ClientRepository::create(
            &mut conn,
            NewClient {
                agent_id,
                full_name: req.full_name.trim(),
                email: &email,
                phone: phone.as_deref(),
                nationality: nationality.as_deref(),
                notes: notes.as_deref(),
            },
        )?;

        info!(client_id = %client.id, agent_id = %agent_id, "Client created");
        Ok(client.into())
    }

    pub fn get(state: &AppState, agent_id: Uuid, id: Uuid) -> Result<ClientDto, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        Ok(ClientRepository::get_for_agent(&mut conn, id, agent_id)?.into())
    }

    pub fn update(
        state: &AppState,
        agent_id: Uuid,
        id: Uuid,
        req: UpdateClientRequest,
    ) -> Result<ClientDto, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        ClientRepository::get_for_agent(&mut conn, id, agent_id)?;

        let changes = ClientChanges {
            full_name: req.full_name.map(|n| n.trim().to_string()),
            email: req.email.as_deref().map(normalize_email),
            phone: clean_optional(req.phone),
            nationality: clean_optional(req.nationality),
            notes: clean_optional(req.notes),
        };

        Ok(ClientRepository::update(&mut conn, id, &changes)?.into())
    }

    /// Clients with quotes are kept for the quote history.
    pub fn delete(state: &AppState, agent_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        ClientRepository::get_for_agent(&mut conn, id, agent_id)?;

        if ClientRepository::count_quotes(&mut conn, id)? > 0 {
            return Err(ApiError::Conflict(
                "Client is referenced by existing quotes".into(),
            ));
        }

        ClientRepository::delete(&mut conn, id)?;
        info!(client_id = %id, agent_id = %agent_id, "Client deleted");
        Ok(())
    }
}
