//! Repository for the `inspections` table.

use railtrack_core::inspection::{InspectionFilter, NewInspection};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::inspection::InspectionRow;

/// Column list for `inspections` queries.
const COLUMNS: &str = "id, section_id, status, detail, inspected_at, created_at";

/// Append-only access to inspections.
pub struct InspectionRepo;

impl InspectionRepo {
    pub async fn create(pool: &PgPool, input: &NewInspection) -> Result<InspectionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspections \
                (id, section_id, status, detail, inspected_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InspectionRow>(&query)
            .bind(Uuid::now_v7())
            .bind(input.section_id)
            .bind(input.status.as_str())
            .bind(&input.detail)
            .bind(input.inspected_at)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// List inspections newest-first, optionally for a single section.
    pub async fn list(
        pool: &PgPool,
        filter: &InspectionFilter,
    ) -> Result<Vec<InspectionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inspections \
             WHERE ($1::UUID IS NULL OR section_id = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, InspectionRow>(&query)
            .bind(filter.section_id)
            .bind(filter.limit)
            .fetch_all(pool)
            .await
    }
}
