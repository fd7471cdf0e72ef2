//! Track section entity and its create/patch DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::status::TrackStatus;
use crate::types::{DbId, Timestamp};

/// Display colour for a section in the `safe` state.
pub const DEFAULT_COLOR_SAFE: &str = "#16a34a";
/// Display colour for a section in the `faulty` state.
pub const DEFAULT_COLOR_FAULTY: &str = "#dc2626";

/// A section with at least this many repeated faults counts as critical.
pub const CRITICAL_FAULT_THRESHOLD: i32 = 3;

/// Maximum length for a section name.
pub const MAX_NAME_LENGTH: u64 = 200;

/// A monitored segment of track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSection {
    pub id: DbId,
    pub name: String,
    pub status: TrackStatus,
    pub color_safe: String,
    pub color_faulty: String,
    /// Time of the most recent mark or inspection, `None` until the first one.
    pub last_check: Option<Timestamp>,
    /// Number of faulty observations that arrived while already faulty.
    pub persistent_faults: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}


fn default_color_safe() -> String {
    DEFAULT_COLOR_SAFE.to_string()
}

fn default_color_faulty() -> String {
    DEFAULT_COLOR_FAULTY.to_string()
}

/// DTO for creating a section. New sections start `safe` with no faults.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSection {
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub name: String,
    #[serde(default = "default_color_safe")]
    pub color_safe: String,
    #[serde(default = "default_color_faulty")]
    pub color_faulty: String,
}

impl CreateSection {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_safe: default_color_safe(),
            color_faulty: default_color_faulty(),
        }
    }
}

/// DTO for patching a section's attributes.
///
/// A `status` set here is written as-is: it does not touch
/// `persistent_faults` or `last_check`, and raises no alert.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSection {
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub name: Option<String>,
    pub status: Option<TrackStatus>,
    pub color_safe: Option<String>,
    pub color_faulty: Option<String>,
}

impl UpdateSection {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.color_safe.is_none()
            && self.color_faulty.is_none()
    }
}

/// Field patch handed to the store, stamped with the update time.
#[derive(Debug, Clone)]
pub struct SectionPatch {
    pub fields: UpdateSection,
    pub updated_at: Timestamp,
}

/// Section update produced by the observation transition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionObservation {
    pub status: TrackStatus,
    pub last_check: Timestamp,
    pub updated_at: Timestamp,
    /// Apply `persistent_faults + 1` at the store.
    pub increment_faults: bool,
}

/// Filter for counting sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionFilter {
    All,
    Status(TrackStatus),
    MinPersistentFaults(i32),
}

impl SectionFilter {
    pub fn matches(&self, section: &TrackSection) -> bool {
        match *self {
            SectionFilter::All => true,
            SectionFilter::Status(status) => section.status == status,
            SectionFilter::MinPersistentFaults(min) => section.persistent_faults >= min,
        }
    }
}
