//! JWT authentication for the API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::db;
use crate::domain::UserRole;
use crate::error::AppError;
use crate::state::AppState;

/// JWT claims for an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// User id
    pub uid: i64,
    /// Role at token issue time (informational; the middleware re-reads it)
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated caller identity, injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

/// Create an access token for a user
pub fn create_token(
    user: &db::users::User,
    secret: &str,
    expire_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user.username.clone(),
        uid: user.id,
        role: user.role.clone(),
        exp: (now + chrono::Duration::minutes(expire_minutes)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Middleware that extracts and verifies the Bearer token, then re-reads
/// the user row so role changes and deactivation take effect immediately.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header").into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization format").into_response())?;

    let claims = decode_token(token, &state.jwt_secret).map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        AppError::invalid_token("Invalid or expired token").into_response()
    })?;

    let user = db::users::find_by_id(&state.pool, claims.uid)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed during auth: {e}");
            AppError::internal().into_response()
        })?
        .ok_or_else(|| AppError::invalid_token("Unknown user").into_response())?;

    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated").into_response());
    }

    let role = UserRole::from_name(&user.role).ok_or_else(|| {
        tracing::error!(user_id = user.id, role = %user.role, "Malformed role in user row");
        AppError::internal().into_response()
    })?;

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
        role,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> db::users::User {
        db::users::User {
            id: 9,
            username: "alice".to_string(),
            email: None,
            hashed_password: String::new(),
            telegram: "@alice".to_string(),
            role: "CURATOR".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let token = create_token(&sample_user(), "test-secret", 30).unwrap();
        let claims = decode_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.uid, 9);
        assert_eq!(claims.role, "CURATOR");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = create_token(&sample_user(), "test-secret", 30).unwrap();
        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_token_rejects_expired() {
        let token = create_token(&sample_user(), "test-secret", -5).unwrap();
        assert!(decode_token(&token, "test-secret").is_err());
    }
}
