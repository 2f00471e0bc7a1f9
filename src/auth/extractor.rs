use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::AppError;
use crate::policy::Role;
use crate::state::SharedState;

/// Identity decoded from the bearer token. Runs before any handler logic;
/// handlers that gate on role reload the user row rather than trusting
/// `role` here, so role changes take effect without re-login.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        let claims = jwt::decode_token(token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
            email: claims.email,
            role: claims.role,
        })
    }
}
