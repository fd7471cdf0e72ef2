//! Repository for the `alerts` table.

use railtrack_core::alert::{AlertFilter, NewAlert};
use railtrack_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::alert::AlertRow;

/// Column list for `alerts` queries.
const COLUMNS: &str = "id, section_id, message, severity, acknowledged, created_at";

/// Provides insert, listing and acknowledgement for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert a new, unacknowledged alert.
    pub async fn create(pool: &PgPool, input: &NewAlert) -> Result<AlertRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (id, section_id, message, severity, acknowledged, created_at) \
             VALUES ($1, $2, $3, $4, FALSE, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AlertRow>(&query)
            .bind(Uuid::now_v7())
            .bind(input.section_id)
            .bind(&input.message)
            .bind(input.severity.as_str())
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// List alerts newest-first, optionally only unacknowledged ones.
    pub async fn list(pool: &PgPool, filter: &AlertFilter) -> Result<Vec<AlertRow>, sqlx::Error> {
        let where_clause = if filter.only_open {
            "WHERE NOT acknowledged"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM alerts {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, AlertRow>(&query)
            .bind(filter.limit)
            .fetch_all(pool)
            .await
    }

    /// Set `acknowledged = TRUE`. Returns matched rows, so re-acknowledging
    /// still reports 1.
    pub async fn acknowledge(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE alerts SET acknowledged = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
