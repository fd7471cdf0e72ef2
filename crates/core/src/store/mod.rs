//! Persistence collaborator for the status engine.
//!
//! [`TrackStore`] is the typed form of a per-collection document store:
//! insert, find by id, filtered/sorted/limited listing, update and delete by
//! id (returning matched/deleted counts) and filtered counts. The engine only
//! ever talks to this trait, so the PostgreSQL store and [`MemoryStore`] are
//! interchangeable.
//!
//! No operation spans more than one collection and none is transactional.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::alert::{Alert, AlertFilter, NewAlert};
use crate::error::CoreError;
use crate::inspection::{Inspection, InspectionFilter, NewInspection};
use crate::section::{CreateSection, SectionFilter, SectionObservation, SectionPatch, TrackSection};
use crate::types::{DbId, Timestamp};
use crate::user::{NewUser, User};

pub type StoreResult<T> = Result<T, CoreError>;

#[async_trait]
pub trait TrackStore: Send + Sync {
    // -- sections --

    /// Insert a new `safe` section with zero faults.
    async fn insert_section(&self, input: &CreateSection, now: Timestamp)
        -> StoreResult<TrackSection>;

    async fn find_section(&self, id: DbId) -> StoreResult<Option<TrackSection>>;

    /// All sections ordered by name.
    async fn list_sections(&self) -> StoreResult<Vec<TrackSection>>;

    /// Apply an observation update. When `increment_faults` is set the
    /// counter is incremented in place (`persistent_faults + 1`), never
    /// overwritten with a value computed by the caller.
    ///
    /// Returns the number of matched sections.
    async fn apply_observation(&self, id: DbId, update: &SectionObservation) -> StoreResult<u64>;

    /// Set the given fields. Returns the number of matched sections.
    async fn patch_section(&self, id: DbId, patch: &SectionPatch) -> StoreResult<u64>;

    /// Returns the number of deleted sections. Inspections and alerts that
    /// reference the section are left in place.
    async fn delete_section(&self, id: DbId) -> StoreResult<u64>;

    async fn count_sections(&self, filter: SectionFilter) -> StoreResult<i64>;

    // -- inspections --

    async fn insert_inspection(&self, input: NewInspection) -> StoreResult<Inspection>;

    /// Newest first, by `created_at`.
    async fn list_inspections(&self, filter: InspectionFilter) -> StoreResult<Vec<Inspection>>;

    // -- alerts --

    async fn insert_alert(&self, input: NewAlert) -> StoreResult<Alert>;

    /// Newest first, by `created_at`.
    async fn list_alerts(&self, filter: AlertFilter) -> StoreResult<Vec<Alert>>;

    /// Set `acknowledged = true`. Returns the number of matched alerts,
    /// including ones that were already acknowledged.
    async fn acknowledge_alert(&self, id: DbId) -> StoreResult<u64>;

    // -- users --

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn insert_user(&self, input: NewUser) -> StoreResult<User>;

    async fn update_user_token(&self, id: DbId, token: &str) -> StoreResult<u64>;

    // -- health --

    /// Cheap connectivity probe.
    async fn ping(&self) -> StoreResult<()>;
}
