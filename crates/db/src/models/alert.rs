//! Row model for the `alerts` table.

use railtrack_core::alert::Alert;
use railtrack_core::error::CoreError;
use railtrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `alerts` table.
#[derive(Debug, Clone, FromRow)]
pub struct AlertRow {
    pub id: DbId,
    pub section_id: DbId,
    pub message: String,
    pub severity: String,
    pub acknowledged: bool,
    pub created_at: Timestamp,
}

impl TryFrom<AlertRow> for Alert {
    type Error = CoreError;

    fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
        Ok(Alert {
            id: row.id,
            section_id: row.section_id,
            message: row.message,
            severity: row.severity.parse()?,
            acknowledged: row.acknowledged,
            created_at: row.created_at,
        })
    }
}
