//! Row model for the `users` table.

use railtrack_core::error::CoreError;
use railtrack_core::types::{DbId, Timestamp};
use railtrack_core::user::User;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: Option<String>,
    pub created_at: Timestamp,
}

impl TryFrom<UserRow> for User {
    type Error = CoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role.parse()?,
            token: row.token,
            created_at: row.created_at,
        })
    }
}
