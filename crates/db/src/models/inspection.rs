//! Row model for the `inspections` table.

use railtrack_core::error::CoreError;
use railtrack_core::inspection::Inspection;
use railtrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `inspections` table.
#[derive(Debug, Clone, FromRow)]
pub struct InspectionRow {
    pub id: DbId,
    pub section_id: DbId,
    pub status: String,
    pub detail: Option<String>,
    pub inspected_at: Timestamp,
    pub created_at: Timestamp,
}

impl TryFrom<InspectionRow> for Inspection {
    type Error = CoreError;

    fn try_from(row: InspectionRow) -> Result<Self, Self::Error> {
        Ok(Inspection {
            id: row.id,
            section_id: row.section_id,
            status: row.status.parse()?,
            detail: row.detail,
            inspected_at: row.inspected_at,
            created_at: row.created_at,
        })
    }
}
