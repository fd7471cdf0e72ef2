//! Repository for the `users` table.

use railtrack_core::types::DbId;
use railtrack_core::user::NewUser;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::UserRow;

/// Column list for `users` queries.
const COLUMNS: &str = "id, name, email, role, token, created_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, email, role, token, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(Uuid::now_v7())
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.role.as_str())
            .bind(&input.token)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Replace a user's token. Returns the number of matched rows.
    pub async fn update_token(pool: &PgPool, id: DbId, token: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
