use sqlx::PgPool;
use uuid::Uuid;

use crate::models::UserCredentials;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    password_hash: &str,
) -> Result<UserCredentials, sqlx::Error> {
    sqlx::query_as::<_, UserCredentials>(
        "INSERT INTO user_credentials (user_id, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(user_id)
    .bind(password_hash)
    .fetch_one(executor)
    .await
}

pub async fn find_by_user_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as::<_, UserCredentials>("SELECT * FROM user_credentials WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
