use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::DocumentType;
use crate::policy::{self, Action};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateDocumentType {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateDocumentType {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub is_active: Option<bool>,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateDocumentType>,
) -> Result<Json<DocumentType>, AppError> {
    let user = super::current_user(&state, &auth).await?;
    policy::require(user.role, Action::CreateDocumentType)?;

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let doc_type =
        db::document_types::create(&state.pool, &req.name, req.description.as_deref(), user.id)
            .await?;

    Ok(Json(doc_type))
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DocumentType>>, AppError> {
    let types = db::document_types::list(&state.pool, params.is_active).await?;
    Ok(Json(types))
}

pub async fn count(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let count = db::document_types::count(&state.pool).await?;
    Ok(Json(serde_json::json!({ "count": count })))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentType>, AppError> {
    let doc_type = db::document_types::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document type not found".to_string()))?;
    Ok(Json(doc_type))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDocumentType>,
) -> Result<Json<DocumentType>, AppError> {
    let user = super::current_user(&state, &auth).await?;
    policy::require(user.role, Action::UpdateDocumentType)?;

    let doc_type = db::document_types::update(
        &state.pool,
        id,
        req.name.as_deref(),
        req.description.as_deref(),
        req.is_active,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Document type not found".to_string()))?;

    Ok(Json(doc_type))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = super::current_user(&state, &auth).await?;
    policy::require(user.role, Action::DeleteDocumentType)?;

    let deleted = db::document_types::delete(&state.pool, id)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::Conflict(
                    "Document type is still referenced by documents".to_string(),
                )
            }
            _ => AppError::Database(e),
        })?;

    if deleted == 0 {
        return Err(AppError::NotFound("Document type not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
