use eyre::{eyre, Report};
use secrecy::SecretString;
use std::env;

const MIN_SECRET_LEN: usize = 32;

/// Verification settings for session tokens minted by the identity provider.
#[derive(Clone, Debug)]
pub struct AuthInfo {
    pub jwt_secret: SecretString,
    pub jwt_audience: String,
    pub jwt_issuer: Option<String>,
    pub cookie_name: String,
}

impl AuthInfo {
    pub fn new() -> Result<AuthInfo, Report> {
        let jwt_secret = env::var("AUTH_JWT_SECRET")
            .map_err(|_| eyre!("AUTH_JWT_SECRET environment variable must be set"))?;

        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(eyre!(
                "AUTH_JWT_SECRET must be at least {} characters long",
                MIN_SECRET_LEN
            ));
        }

        Ok(Self {
            jwt_secret: SecretString::from(jwt_secret),
            jwt_audience: env::var("AUTH_JWT_AUDIENCE")
                .unwrap_or_else(|_| "authenticated".into()),
            jwt_issuer: env::var("AUTH_JWT_ISSUER").ok().filter(|s| !s.is_empty()),
            cookie_name: env::var("AUTH_COOKIE_NAME")
                .unwrap_or_else(|_| "sb-access-token".into()),
        })
    }
}
