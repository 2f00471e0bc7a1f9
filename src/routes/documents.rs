use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::documents::{ListFilter, NewDocument};
use crate::error::AppError;
use crate::models::{ApprovalDecision, Document, DocumentStatus, DocumentWithRelations};
use crate::policy::{self, Action, Role};
use crate::state::SharedState;
use crate::storage;

#[derive(Deserialize)]
pub struct ListParams {
    pub status: Option<DocumentStatus>,
    pub document_type_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub status: ApprovalDecision,
    pub remarks: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Default)]
struct UploadForm {
    title: Option<String>,
    document_type_id: Option<String>,
    remarks: Option<String>,
    file: Option<UploadedPart>,
}

struct UploadedPart {
    file_name: String,
    mime_type: Option<String>,
    data: Bytes,
}

/// Parse the upload form from a multipart body using multer. Only the file
/// part is kept as bytes; everything else is read as text.
async fn parse_upload(headers: &HeaderMap, body: Bytes) -> Result<UploadForm, AppError> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| AppError::BadRequest("Expected multipart/form-data".to_string()))?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field.content_type().map(|m| m.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("File read error: {e}")))?;
                form.file = Some(UploadedPart {
                    file_name,
                    mime_type,
                    data,
                });
            }
            Some(other) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Field read error: {e}")))?;
                match other {
                    "title" => form.title = Some(value),
                    "document_type_id" => form.document_type_id = Some(value),
                    "remarks" => form.remarks = Some(value),
                    _ => {}
                }
            }
            None => {}
        }
    }

    Ok(form)
}

pub async fn upload(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Document>, AppError> {
    // Role check precedes any parsing or file write.
    let user = super::current_user(&state, &auth).await?;
    policy::require(user.role, Action::UploadDocument)?;

    let form = parse_upload(&headers, body).await?;

    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let title = form
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;
    let document_type_id: Uuid = form
        .document_type_id
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid document_type_id".to_string()))?;

    db::document_types::find_by_id(&state.pool, document_type_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document type not found".to_string()))?;

    let stored = storage::save(&state.config.upload_dir, &file.file_name, &file.data)
        .await
        .map_err(AppError::Internal)?;

    let new = NewDocument {
        title: &title,
        file_name: &file.file_name,
        file_path: &stored.path,
        mime_type: file.mime_type.as_deref(),
        file_size: stored.size,
        document_type_id,
        uploaded_by: user.id,
        remarks: form.remarks.as_deref(),
    };

    // A failed insert must not leave the written file behind.
    let document = match db::documents::create(&state.pool, &new).await {
        Ok(document) => document,
        Err(e) => {
            storage::remove(&stored.path).await;
            return Err(e.into());
        }
    };

    tracing::info!("Document {} uploaded by {}", document.id, user.email);

    Ok(Json(document))
}

fn visibility_filter(user_role: Role, user_id: Uuid, params: &ListParams) -> ListFilter {
    let mut filter = ListFilter {
        status: params.status,
        document_type_id: params.document_type_id,
        uploaded_by: params.uploaded_by,
    };
    // An uploader only ever sees their own documents, whatever filter they
    // supplied.
    if user_role == Role::DocumentUploader {
        filter.uploaded_by = Some(user_id);
    }
    filter
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DocumentWithRelations>>, AppError> {
    let user = super::current_user(&state, &auth).await?;
    let filter = visibility_filter(user.role, user.id, &params);
    let documents = db::documents::list(&state.pool, &filter).await?;
    Ok(Json(documents))
}

pub async fn count(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = super::current_user(&state, &auth).await?;
    let filter = visibility_filter(user.role, user.id, &params);
    let count = db::documents::count(&state.pool, &filter).await?;
    Ok(Json(serde_json::json!({ "count": count })))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentWithRelations>, AppError> {
    let user = super::current_user(&state, &auth).await?;

    let document = db::documents::find_with_relations(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    // Same NotFound as a missing row, so an uploader cannot probe for other
    // users' document ids.
    if user.role == Role::DocumentUploader && document.document.uploaded_by != user.id {
        return Err(AppError::NotFound("Document not found".to_string()));
    }

    Ok(Json(document))
}

pub async fn approve(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<Document>, AppError> {
    let user = super::current_user(&state, &auth).await?;
    policy::require(user.role, Action::ApproveDocument)?;

    if req.status == ApprovalDecision::Rejected
        && req.remarks.as_deref().is_none_or(|r| r.trim().is_empty())
    {
        return Err(AppError::BadRequest(
            "Remarks are required when rejecting a document".to_string(),
        ));
    }

    let finalized = db::documents::finalize(
        &state.pool,
        id,
        req.status.status(),
        user.id,
        req.remarks.as_deref(),
    )
    .await?;

    match finalized {
        Some(document) => {
            tracing::info!(
                "Document {} {} by {}",
                document.id,
                req.status.status().as_str(),
                user.email
            );
            Ok(Json(document))
        }
        None => {
            if db::documents::find_by_id(&state.pool, id).await?.is_some() {
                Err(AppError::Conflict(
                    "Document has already been approved or rejected".to_string(),
                ))
            } else {
                Err(AppError::NotFound("Document not found".to_string()))
            }
        }
    }
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDocument>,
) -> Result<Json<Document>, AppError> {
    let user = super::current_user(&state, &auth).await?;

    let existing = db::documents::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    // Metadata edits: admins, or the uploader on their own document. Status
    // is only writable through the approve endpoint.
    if user.role != Role::Admin && existing.uploaded_by != user.id {
        return Err(AppError::Forbidden(
            "You do not have permission to update this document".to_string(),
        ));
    }

    let document =
        db::documents::update_metadata(&state.pool, id, req.title.as_deref(), req.remarks.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    Ok(Json(document))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = super::current_user(&state, &auth).await?;
    policy::require(user.role, Action::DeleteDocument)?;

    let file_path = db::documents::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    storage::remove(&file_path).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
