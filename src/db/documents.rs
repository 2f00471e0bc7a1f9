use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Document, DocumentStatus, DocumentWithRelations};

pub struct NewDocument<'a> {
    pub title: &'a str,
    pub file_name: &'a str,
    pub file_path: &'a str,
    pub mime_type: Option<&'a str>,
    pub file_size: i64,
    pub document_type_id: Uuid,
    pub uploaded_by: Uuid,
    pub remarks: Option<&'a str>,
}

/// Filters for the document listing. Visibility scoping (an uploader only
/// ever sees their own rows) is applied by the caller before this runs.
#[derive(Debug, Default)]
pub struct ListFilter {
    pub status: Option<DocumentStatus>,
    pub document_type_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
}

pub async fn create(pool: &PgPool, new: &NewDocument<'_>) -> Result<Document, sqlx::Error> {
    sqlx::query_as::<_, Document>(
        "INSERT INTO documents
             (title, file_name, file_path, mime_type, file_size,
              document_type_id, uploaded_by, remarks)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(new.title)
    .bind(new.file_name)
    .bind(new.file_path)
    .bind(new.mime_type)
    .bind(new.file_size)
    .bind(new.document_type_id)
    .bind(new.uploaded_by)
    .bind(new.remarks)
    .fetch_one(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    filter: &ListFilter,
) -> Result<Vec<DocumentWithRelations>, sqlx::Error> {
    sqlx::query_as::<_, DocumentWithRelations>(
        "SELECT d.*,
                u.username AS uploader_username,
                u.email AS uploader_email,
                dt.name AS document_type_name
         FROM documents d
         JOIN users u ON d.uploaded_by = u.id
         JOIN document_types dt ON d.document_type_id = dt.id
         WHERE ($1::document_status IS NULL OR d.status = $1)
           AND ($2::uuid IS NULL OR d.document_type_id = $2)
           AND ($3::uuid IS NULL OR d.uploaded_by = $3)
         ORDER BY d.created_at DESC",
    )
    .bind(filter.status)
    .bind(filter.document_type_id)
    .bind(filter.uploaded_by)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool, filter: &ListFilter) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM documents d
         WHERE ($1::document_status IS NULL OR d.status = $1)
           AND ($2::uuid IS NULL OR d.document_type_id = $2)
           AND ($3::uuid IS NULL OR d.uploaded_by = $3)",
    )
    .bind(filter.status)
    .bind(filter.document_type_id)
    .bind(filter.uploaded_by)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Document>, sqlx::Error> {
    sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_with_relations(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<DocumentWithRelations>, sqlx::Error> {
    sqlx::query_as::<_, DocumentWithRelations>(
        "SELECT d.*,
                u.username AS uploader_username,
                u.email AS uploader_email,
                dt.name AS document_type_name
         FROM documents d
         JOIN users u ON d.uploaded_by = u.id
         JOIN document_types dt ON d.document_type_id = dt.id
         WHERE d.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Finalize a pending document. The `status = 'pending'` guard makes the
/// transition single-shot: a second decision, concurrent or not, matches no
/// row and the caller reports the conflict.
pub async fn finalize(
    pool: &PgPool,
    id: Uuid,
    status: DocumentStatus,
    approved_by: Uuid,
    remarks: Option<&str>,
) -> Result<Option<Document>, sqlx::Error> {
    sqlx::query_as::<_, Document>(
        "UPDATE documents
         SET status = $2, approved_by = $3, approved_at = now(),
             remarks = $4, updated_at = now()
         WHERE id = $1 AND status = 'pending' RETURNING *",
    )
    .bind(id)
    .bind(status)
    .bind(approved_by)
    .bind(remarks)
    .fetch_optional(pool)
    .await
}

pub async fn update_metadata(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    remarks: Option<&str>,
) -> Result<Option<Document>, sqlx::Error> {
    sqlx::query_as::<_, Document>(
        "UPDATE documents
         SET title = COALESCE($2, title),
             remarks = COALESCE($3, remarks),
             updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(title)
    .bind(remarks)
    .fetch_optional(pool)
    .await
}

/// Delete a document row, returning the stored file path so the caller can
/// remove the file afterwards.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as("DELETE FROM documents WHERE id = $1 RETURNING file_path")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|r| r.0))
}
