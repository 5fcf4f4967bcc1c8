use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{application::usecases::errors::UseCaseError, config::config_loader};

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthClaims {
    pub sub: String,
    pub email: Option<String>,
    pub iat: usize,
    pub exp: usize,
}

/// Verified subject identity, extracted per request. Handlers receive it as
/// a parameter; nothing reads the current user from ambient state.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

pub fn issue_access_token(user_id: Uuid, email: Option<String>) -> anyhow::Result<(String, u64)> {
    let auth = config_loader::get_auth_secret()?;

    let now = Utc::now().timestamp() as usize;
    let claims = AuthClaims {
        sub: user_id.to_string(),
        email,
        iat: now,
        exp: now + auth.token_ttl_seconds as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )?;

    Ok((token, auth.token_ttl_seconds))
}

pub fn validate_access_token(token: &str) -> anyhow::Result<AuthClaims> {
    let auth = config_loader::get_auth_secret()
        .map_err(|e| anyhow::anyhow!("Failed to load auth secret: {}", e))?;

    let decoding_key = DecodingKey::from_secret(auth.jwt_secret.as_bytes());
    let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

    let token_data = decode::<AuthClaims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("Token validation failed: {}", e))?;

    Ok(token_data.claims)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = UseCaseError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or(UseCaseError::Unauthenticated)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| UseCaseError::Unauthenticated)?;

        if !auth_str.starts_with("Bearer ") {
            return Err(UseCaseError::Unauthenticated);
        }

        let token = &auth_str[7..];

        let claims = validate_access_token(token).map_err(|err| {
            debug!(error = %err, "auth: rejected bearer token");
            UseCaseError::InvalidCredential
        })?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| UseCaseError::InvalidCredential)?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests;
