use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

/// Identity injected into the request once a strategy accepts it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

/// Caller-identity capability. The strategy is picked once by configuration;
/// handlers never branch on it.
#[derive(Clone)]
pub enum AuthStrategy {
    /// Always succeeds with a fixed identity. Development and test builds.
    Mock,
    /// Verifies an HS256 bearer token carrying `Claims`.
    Jwt { secret: String },
}

impl AuthStrategy {
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
        match self {
            AuthStrategy::Mock => Ok(AuthUser {
                id: "mock-user-id-123".to_string(),
                email: "admin@example.com".to_string(),
                role: "admin".to_string(),
            }),
            AuthStrategy::Jwt { secret } => {
                let token = bearer_token(headers).ok_or_else(|| {
                    ApiError::Unauthorized(
                        "You are not logged in! Please log in to get access.".to_string(),
                    )
                })?;

                let claims = verify_token(token, secret)?;
                Ok(AuthUser {
                    id: claims.id,
                    email: claims.email,
                    role: claims.role,
                })
            }
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::Unauthorized("Invalid or expired token!".to_string()))?;

    if data.claims.id.is_empty() || data.claims.email.is_empty() {
        return Err(ApiError::Unauthorized("Invalid token payload!".to_string()));
    }

    Ok(data.claims)
}

/// Signs a token for the given identity, expiring after `ttl_hours`.
pub fn issue_token(
    secret: &str,
    id: &str,
    email: &str,
    role: &str,
    ttl_hours: i64,
) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        id: id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(ttl_hours)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Unexpected(e.to_string()))
}

/// Runs the configured strategy and stashes the identity in request
/// extensions for downstream handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = state.auth.authenticate(request.headers())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
