use crate::app_state::AppState;
use crate::repositories::agent_repository::AgentRepository;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use baliquote_primitives::error::{ApiError, AuthError};
use baliquote_primitives::models::app_state::AuthInfo;
use baliquote_primitives::models::entities::agent::Agent;
use http::header::{AUTHORIZATION, COOKIE};
use http::HeaderMap;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

/// Session token claims issued by the identity provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // identity provider user id, also the agent id
    pub email: Option<String>,
    pub role: Option<String>,
    pub aud: String,
    pub iss: Option<String>,
    pub exp: i64,
    pub iat: Option<i64>,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        Uuid::parse_str(&self.sub).map_err(|e| {
            error!("Invalid user ID in claims: {}", e);
            ApiError::Auth(AuthError::InvalidToken("Invalid user ID".to_string()))
        })
    }
}

/// Approved agent resolved for the current request.
#[derive(Clone, Debug)]
pub struct CurrentAgent(pub Agent);

impl CurrentAgent {
    pub fn id(&self) -> Uuid {
        self.0.id
    }
}

pub struct SecurityConfig;

impl SecurityConfig {
    /// Bearer header wins over the session cookie when both are present.
    pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Result<String, AuthError> {
        if let Some(value) = headers.get(AUTHORIZATION) {
            let auth_header = value.to_str().map_err(|_| AuthError::InvalidFormat)?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(AuthError::InvalidFormat)?
                .trim();

            if token.is_empty() {
                return Err(AuthError::InvalidFormat);
            }

            return Ok(token.to_string());
        }

        Self::cookie_token(headers, cookie_name).ok_or(AuthError::MissingToken)
    }

    fn cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == cookie_name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn verify_token(auth: &AuthInfo, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[auth.jwt_audience.as_str()]);
        if let Some(issuer) = auth.jwt_issuer.as_deref() {
            validation.set_issuer(&[issuer]);
        }
        validation.validate_exp = true;
        validation.validate_nbf = true;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(auth.jwt_secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            warn!("Rejected session token: {}", e);
            AuthError::InvalidToken("Invalid or expired token".into())
        })
    }

    pub async fn auth_middleware(
        State(state): State<Arc<AppState>>,
        mut req: Request<axum::body::Body>,
        next: Next,
    ) -> Result<Response, Response> {
        let auth = &state.config.auth_details;

        let token = Self::extract_token(req.headers(), &auth.cookie_name)
            .map_err(|e| ApiError::from(e).into_response())?;

        let claims =
            Self::verify_token(auth, &token).map_err(|e| ApiError::from(e).into_response())?;

        req.extensions_mut().insert(claims);
        Ok(next.run(req).await)
    }

    /// Runs after `auth_middleware`. Only approved agents get through.
    pub async fn agent_middleware(
        State(state): State<Arc<AppState>>,
        mut req: Request<axum::body::Body>,
        next: Next,
    ) -> Result<Response, Response> {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| ApiError::from(AuthError::MissingToken).into_response())?;

        let agent_id = claims.user_id().map_err(|e| e.into_response())?;

        let mut conn = state.db.get().map_err(|e| {
            error!("Agent lookup failed to get a connection: {}", e);
            ApiError::DatabaseConnection(e.to_string()).into_response()
        })?;

        let agent = AgentRepository::find_by_id(&mut conn, agent_id)
            .map_err(|e| e.into_response())?
            .ok_or_else(|| {
                ApiError::Forbidden("Agent profile not found, complete onboarding first".into())
                    .into_response()
            })?;

        if !agent.is_approved {
            return Err(
                ApiError::Forbidden("Agent account is awaiting approval".into()).into_response(),
            );
        }

        req.extensions_mut().insert(CurrentAgent(agent));
        Ok(next.run(req).await)
    }

    /// Runs after `agent_middleware`.
    pub async fn admin_middleware(
        req: Request<axum::body::Body>,
        next: Next,
    ) -> Result<Response, Response> {
        let is_admin = req
            .extensions()
            .get::<CurrentAgent>()
            .map(|current| current.0.is_admin)
            .unwrap_or(false);

        if !is_admin {
            return Err(ApiError::Forbidden("Admin access required".into()).into_response());
        }

        Ok(next.run(req).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::SecretString;

    const SECRET: &str = "test-secret-that-is-at-least-32-characters";

    fn auth_info() -> AuthInfo {
        AuthInfo {
            jwt_secret: SecretString::from(SECRET.to_string()),
            jwt_audience: "authenticated".into(),
            jwt_issuer: None,
            cookie_name: "sb-access-token".into(),
        }
    }

    fn token(aud: &str, exp_offset: Duration, secret: &str) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: Some("agent@example.com".into()),
            role: Some("authenticated".into()),
            aud: aud.into(),
            iss: None,
            exp: (now + exp_offset).timestamp(),
            iat: Some(now.timestamp()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_claims() {
        let claims =
            SecurityConfig::verify_token(&auth_info(), &token("authenticated", Duration::hours(1), SECRET))
                .unwrap();

        assert!(claims.user_id().is_ok());
        assert_eq!(claims.email.as_deref(), Some("agent@example.com"));
    }

    #[test]
    fn expired_wrong_audience_and_wrong_key_are_rejected() {
        let auth = auth_info();

        let expired = token("authenticated", Duration::hours(-2), SECRET);
        assert!(SecurityConfig::verify_token(&auth, &expired).is_err());

        let wrong_aud = token("anon", Duration::hours(1), SECRET);
        assert!(SecurityConfig::verify_token(&auth, &wrong_aud).is_err());

        let wrong_key = token(
            "authenticated",
            Duration::hours(1),
            "another-secret-that-is-at-least-32-chars",
        );
        assert!(SecurityConfig::verify_token(&auth, &wrong_key).is_err());
    }

    #[test]
    fn bearer_header_is_preferred_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer header-token"));
        headers.insert(COOKIE, HeaderValue::from_static("sb-access-token=cookie-token"));

        let token = SecurityConfig::extract_token(&headers, "sb-access-token").unwrap();
        assert_eq!(token, "header-token");
    }

    #[test]
    fn session_cookie_is_read_when_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; sb-access-token=cookie-token; lang=id"),
        );

        let token = SecurityConfig::extract_token(&headers, "sb-access-token").unwrap();
        assert_eq!(token, "cookie-token");
    }

    #[test]
    fn missing_or_malformed_credentials() {
        let headers = HeaderMap::new();
        assert_eq!(
            SecurityConfig::extract_token(&headers, "sb-access-token"),
            Err(AuthError::MissingToken)
        );

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(
            SecurityConfig::extract_token(&headers, "sb-access-token"),
            Err(AuthError::InvalidFormat)
        );
    }
}
