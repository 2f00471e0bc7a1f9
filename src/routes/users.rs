use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::policy::Role;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

pub async fn signup(
    State(state): State<SharedState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<User>, AppError> {
    if req.email.is_empty() || req.username.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }
    if req.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    // Closed role set; unknown role strings are rejected up front.
    let role: Role = req.role.parse().map_err(AppError::BadRequest)?;

    if db::users::find_by_email(&state.pool, &req.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // User and credentials rows are committed together or not at all.
    let mut tx = state.pool.begin().await?;

    let user = db::users::create(&mut *tx, &req.email, &req.username, role)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    db::user_credentials::create(&mut *tx, user.id, &pw_hash).await?;

    tx.commit().await?;

    tracing::info!("New {} signup: {}", user.role, user.email);

    Ok(Json(user))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // Unknown email, missing credentials row and bad password all fail with
    // the same message so the cause is not distinguishable from outside.
    let user = db::users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let credentials = db::user_credentials::find_by_user_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let valid =
        password::verify(&req.password, &credentials.password_hash).map_err(AppError::Internal)?;
    if !valid {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let claims = Claims::new(&user, state.config.token_expiry_secs);
    let token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(LoginResponse { token, user }))
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<User>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
    Ok(Json(user))
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = db::users::list_all(&state.pool).await?;
    Ok(Json(users))
}
