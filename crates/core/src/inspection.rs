//! Inspection records: one append-only row per observation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::status::TrackStatus;
use crate::types::{DbId, Timestamp};

/// Detail recorded for observations coming from the status-only mark path.
pub const MANUAL_MARK_DETAIL: &str = "manual-mark";

/// Maximum length of free-text inspection detail.
pub const MAX_DETAIL_LENGTH: u64 = 2_000;

/// A single recorded observation of a section.
///
/// `section_id` is a plain reference: it is not checked against existing
/// sections once written and survives the section's deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub id: DbId,
    pub section_id: DbId,
    pub status: TrackStatus,
    pub detail: Option<String>,
    pub inspected_at: Timestamp,
    pub created_at: Timestamp,
}

/// Insert payload for an inspection.
#[derive(Debug, Clone)]
pub struct NewInspection {
    pub section_id: DbId,
    pub status: TrackStatus,
    pub detail: Option<String>,
    pub inspected_at: Timestamp,
    pub created_at: Timestamp,
}

/// Listing filter, newest first.
#[derive(Debug, Clone, Copy)]
pub struct InspectionFilter {
    pub section_id: Option<DbId>,
    pub limit: i64,
}

/// Request body for submitting a full inspection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InspectRequest {
    pub section_id: String,
    pub status: TrackStatus,
    #[validate(length(max = MAX_DETAIL_LENGTH))]
    pub detail: Option<String>,
}

/// Request body for the status-only mark path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarkRequest {
    pub status: TrackStatus,
}
