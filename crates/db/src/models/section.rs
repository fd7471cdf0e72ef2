//! Row model for the `track_sections` table.

use railtrack_core::error::CoreError;
use railtrack_core::section::TrackSection;
use railtrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `track_sections` table.
#[derive(Debug, Clone, FromRow)]
pub struct SectionRow {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub color_safe: String,
    pub color_faulty: String,
    pub last_check: Option<Timestamp>,
    pub persistent_faults: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<SectionRow> for TrackSection {
    type Error = CoreError;

    fn try_from(row: SectionRow) -> Result<Self, Self::Error> {
        Ok(TrackSection {
            id: row.id,
            name: row.name,
            status: row.status.parse()?,
            color_safe: row.color_safe,
            color_faulty: row.color_faulty,
            last_check: row.last_check,
            persistent_faults: row.persistent_faults,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
