//! Repository for the `track_sections` table.

use railtrack_core::section::{CreateSection, SectionFilter, SectionObservation, SectionPatch};
use railtrack_core::status::TrackStatus;
use railtrack_core::types::{DbId, Timestamp};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::section::SectionRow;

/// Column list for `track_sections` queries.
const COLUMNS: &str = "\
    id, name, status, color_safe, color_faulty, \
    last_check, persistent_faults, created_at, updated_at";

/// Provides CRUD operations for track sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section in the `safe` state with no faults.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSection,
        now: Timestamp,
    ) -> Result<SectionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO track_sections \
                (id, name, status, color_safe, color_faulty, persistent_faults, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, 0, $6, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SectionRow>(&query)
            .bind(Uuid::now_v7())
            .bind(&input.name)
            .bind(TrackStatus::Safe.as_str())
            .bind(&input.color_safe)
            .bind(&input.color_faulty)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a section by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SectionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM track_sections WHERE id = $1");
        sqlx::query_as::<_, SectionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sections ordered by name.
    pub async fn list_by_name(pool: &PgPool) -> Result<Vec<SectionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM track_sections ORDER BY name, id");
        sqlx::query_as::<_, SectionRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply an observation update. The fault counter is incremented in
    /// place so concurrent increments are not lost.
    ///
    /// Returns the number of matched rows.
    pub async fn apply_observation(
        pool: &PgPool,
        id: DbId,
        update: &SectionObservation,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE track_sections SET \
                status = $2, \
                last_check = $3, \
                updated_at = $4, \
                persistent_faults = persistent_faults + CASE WHEN $5 THEN 1 ELSE 0 END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(update.status.as_str())
        .bind(update.last_check)
        .bind(update.updated_at)
        .bind(update.increment_faults)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set the non-`None` fields of a patch and stamp `updated_at`.
    ///
    /// Returns the number of matched rows.
    pub async fn patch(pool: &PgPool, id: DbId, patch: &SectionPatch) -> Result<u64, sqlx::Error> {
        let fields = &patch.fields;
        let result = sqlx::query(
            "UPDATE track_sections SET \
                name = COALESCE($2, name), \
                status = COALESCE($3, status), \
                color_safe = COALESCE($4, color_safe), \
                color_faulty = COALESCE($5, color_faulty), \
                updated_at = $6 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(fields.name.as_deref())
        .bind(fields.status.map(TrackStatus::as_str))
        .bind(fields.color_safe.as_deref())
        .bind(fields.color_faulty.as_deref())
        .bind(patch.updated_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a section. Returns the number of deleted rows.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM track_sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count sections matching a filter.
    pub async fn count(pool: &PgPool, filter: SectionFilter) -> Result<i64, sqlx::Error> {
        match filter {
            SectionFilter::All => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM track_sections")
                    .fetch_one(pool)
                    .await
            }
            SectionFilter::Status(status) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM track_sections WHERE status = $1",
                )
                .bind(status.as_str())
                .fetch_one(pool)
                .await
            }
            SectionFilter::MinPersistentFaults(min) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM track_sections WHERE persistent_faults >= $1",
                )
                .bind(min)
                .fetch_one(pool)
                .await
            }
        }
    }
}
