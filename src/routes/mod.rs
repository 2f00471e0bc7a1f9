pub mod document_types;
pub mod documents;
pub mod users;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

/// Reload the caller's user row for role checks; the role cached in the
/// token is never trusted for authorization decisions.
pub(crate) async fn current_user(
    state: &SharedState,
    auth: &AuthUser,
) -> Result<User, AppError> {
    db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Users
        .route("/users/signup", post(users::signup))
        .route("/users/login", post(users::login))
        .route("/users/me", get(users::me))
        .route("/users", get(users::list))
        // Document types
        .route(
            "/document-types",
            get(document_types::list).post(document_types::create),
        )
        .route("/document-types/count", get(document_types::count))
        .route(
            "/document-types/{id}",
            get(document_types::get)
                .patch(document_types::update)
                .delete(document_types::delete),
        )
        // Documents
        .route("/documents/upload", post(documents::upload))
        .route("/documents", get(documents::list))
        .route("/documents/count", get(documents::count))
        .route(
            "/documents/{id}",
            get(documents::get)
                .patch(documents::update)
                .delete(documents::delete),
        )
        .route("/documents/{id}/approve", patch(documents::approve))
}
