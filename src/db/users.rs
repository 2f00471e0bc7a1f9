use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;
use crate::policy::Role;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
    username: &str,
    role: Role,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, username, role) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(email)
    .bind(username)
    .bind(role)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}
