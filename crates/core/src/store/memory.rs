//! In-process [`TrackStore`] used by tests and local tooling.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreResult, TrackStore};
use crate::alert::{Alert, AlertFilter, NewAlert};
use crate::error::CoreError;
use crate::inspection::{Inspection, InspectionFilter, NewInspection};
use crate::section::{CreateSection, SectionFilter, SectionObservation, SectionPatch, TrackSection};
use crate::status::TrackStatus;
use crate::types::{DbId, Timestamp};
use crate::user::{NewUser, User};

#[derive(Default)]
struct Collections {
    sections: Vec<TrackSection>,
    inspections: Vec<Inspection>,
    alerts: Vec<Alert>,
    users: Vec<User>,
}

/// Vector-backed store guarded by a single lock.
///
/// Each trait call takes the lock once, so a single call is atomic but a
/// sequence of calls is not, matching the PostgreSQL store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
    fail_inspection_inserts: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `insert_inspection` fail with an internal error.
    pub fn set_fail_inspection_inserts(&self, fail: bool) {
        self.fail_inspection_inserts.store(fail, Ordering::SeqCst);
    }

    /// Number of stored inspections, across all sections.
    pub async fn inspection_count(&self) -> usize {
        self.inner.read().await.inspections.len()
    }

    /// Number of stored alerts, acknowledged or not.
    pub async fn alert_count(&self) -> usize {
        self.inner.read().await.alerts.len()
    }

    /// Overwrite a section's fault counter. Seeding helper for tests.
    pub async fn set_persistent_faults(&self, id: DbId, value: i32) -> bool {
        let mut inner = self.inner.write().await;
        match inner.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.persistent_faults = value;
                true
            }
            None => false,
        }
    }
}

/// Newest first; ids are time-ordered so they break `created_at` ties.
fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (Timestamp, DbId)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn limit_to(limit: i64) -> usize {
    usize::try_from(limit.max(0)).unwrap_or(usize::MAX)
}

#[async_trait]
impl TrackStore for MemoryStore {
    async fn insert_section(
        &self,
        input: &CreateSection,
        now: Timestamp,
    ) -> StoreResult<TrackSection> {
        let section = TrackSection {
            id: Uuid::now_v7(),
            name: input.name.clone(),
            status: TrackStatus::Safe,
            color_safe: input.color_safe.clone(),
            color_faulty: input.color_faulty.clone(),
            last_check: None,
            persistent_faults: 0,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.sections.push(section.clone());
        Ok(section)
    }

    async fn find_section(&self, id: DbId) -> StoreResult<Option<TrackSection>> {
        let inner = self.inner.read().await;
        Ok(inner.sections.iter().find(|s| s.id == id).cloned())
    }

    async fn list_sections(&self) -> StoreResult<Vec<TrackSection>> {
        let mut sections = self.inner.read().await.sections.clone();
        sections.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sections)
    }

    async fn apply_observation(&self, id: DbId, update: &SectionObservation) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let Some(section) = inner.sections.iter_mut().find(|s| s.id == id) else {
            return Ok(0);
        };
        section.status = update.status;
        section.last_check = Some(update.last_check);
        section.updated_at = update.updated_at;
        if update.increment_faults {
            section.persistent_faults += 1;
        }
        Ok(1)
    }

    async fn patch_section(&self, id: DbId, patch: &SectionPatch) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let Some(section) = inner.sections.iter_mut().find(|s| s.id == id) else {
            return Ok(0);
        };
        let fields = &patch.fields;
        if let Some(name) = &fields.name {
            section.name = name.clone();
        }
        if let Some(status) = fields.status {
            section.status = status;
        }
        if let Some(color) = &fields.color_safe {
            section.color_safe = color.clone();
        }
        if let Some(color) = &fields.color_faulty {
            section.color_faulty = color.clone();
        }
        section.updated_at = patch.updated_at;
        Ok(1)
    }

    async fn delete_section(&self, id: DbId) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.sections.len();
        inner.sections.retain(|s| s.id != id);
        Ok((before - inner.sections.len()) as u64)
    }

    async fn count_sections(&self, filter: SectionFilter) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner.sections.iter().filter(|s| filter.matches(s)).count() as i64)
    }

    async fn insert_inspection(&self, input: NewInspection) -> StoreResult<Inspection> {
        if self.fail_inspection_inserts.load(Ordering::SeqCst) {
            return Err(CoreError::Internal("inspection insert failed".into()));
        }
        let inspection = Inspection {
            id: Uuid::now_v7(),
            section_id: input.section_id,
            status: input.status,
            detail: input.detail,
            inspected_at: input.inspected_at,
            created_at: input.created_at,
        };
        self.inner.write().await.inspections.push(inspection.clone());
        Ok(inspection)
    }

    async fn list_inspections(&self, filter: InspectionFilter) -> StoreResult<Vec<Inspection>> {
        let inner = self.inner.read().await;
        let mut found: Vec<Inspection> = inner
            .inspections
            .iter()
            .filter(|i| filter.section_id.map_or(true, |id| i.section_id == id))
            .cloned()
            .collect();
        newest_first(&mut found, |i| (i.created_at, i.id));
        found.truncate(limit_to(filter.limit));
        Ok(found)
    }

    async fn insert_alert(&self, input: NewAlert) -> StoreResult<Alert> {
        let alert = Alert {
            id: Uuid::now_v7(),
            section_id: input.section_id,
            message: input.message,
            severity: input.severity,
            acknowledged: false,
            created_at: input.created_at,
        };
        self.inner.write().await.alerts.push(alert.clone());
        Ok(alert)
    }

    async fn list_alerts(&self, filter: AlertFilter) -> StoreResult<Vec<Alert>> {
        let inner = self.inner.read().await;
        let mut found: Vec<Alert> = inner
            .alerts
            .iter()
            .filter(|a| !filter.only_open || !a.acknowledged)
            .cloned()
            .collect();
        newest_first(&mut found, |a| (a.created_at, a.id));
        found.truncate(limit_to(filter.limit));
        Ok(found)
    }

    async fn acknowledge_alert(&self, id: DbId) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        match inner.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.acknowledged = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, input: NewUser) -> StoreResult<User> {
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            role: input.role,
            token: Some(input.token),
            created_at: input.created_at,
        };
        self.inner.write().await.users.push(user.clone());
        Ok(user)
    }

    async fn update_user_token(&self, id: DbId, token: &str) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        match inner.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.token = Some(token.to_string());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
