use sqlx::PgPool;
use uuid::Uuid;

use crate::models::DocumentType;

pub async fn create(
    pool: &PgPool,
    name: &str,
    description: Option<&str>,
    created_by: Uuid,
) -> Result<DocumentType, sqlx::Error> {
    sqlx::query_as::<_, DocumentType>(
        "INSERT INTO document_types (name, description, created_by)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    is_active: Option<bool>,
) -> Result<Vec<DocumentType>, sqlx::Error> {
    sqlx::query_as::<_, DocumentType>(
        "SELECT * FROM document_types
         WHERE ($1::boolean IS NULL OR is_active = $1)
         ORDER BY created_at DESC",
    )
    .bind(is_active)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM document_types")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<DocumentType>, sqlx::Error> {
    sqlx::query_as::<_, DocumentType>("SELECT * FROM document_types WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
    is_active: Option<bool>,
) -> Result<Option<DocumentType>, sqlx::Error> {
    sqlx::query_as::<_, DocumentType>(
        "UPDATE document_types
         SET name = COALESCE($2, name),
             description = COALESCE($3, description),
             is_active = COALESCE($4, is_active),
             updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(is_active)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM document_types WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
