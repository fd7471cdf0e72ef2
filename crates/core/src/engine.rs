//! Section status engine.
//!
//! Owns the rule for how a section's `status`, `last_check` and
//! `persistent_faults` move together when an observation arrives, and the
//! inspection/alert records derived from it.
//!
//! An observation is a sequence of independent store writes (section update,
//! inspection insert, optional alert insert) with no transaction around them.
//! A failure part-way leaves the earlier writes in place, and two concurrent
//! observations of the same section both decide on the repeat-fault rule
//! from whatever state they loaded. The fault increment itself is applied at
//! the store as `persistent_faults + 1`, so concurrent repeat faults that
//! were both decided are both counted.

use std::sync::Arc;

use chrono::Utc;

use crate::alert::{Alert, AlertFilter, AlertSeverity, NewAlert};
use crate::error::CoreError;
use crate::inspection::{Inspection, InspectionFilter, NewInspection, MANUAL_MARK_DETAIL};
use crate::section::{
    CreateSection, SectionFilter, SectionObservation, SectionPatch, TrackSection, UpdateSection,
    CRITICAL_FAULT_THRESHOLD,
};
use crate::status::TrackStatus;
use crate::store::TrackStore;
use crate::summary::Summary;
use crate::types::{DbId, Timestamp};
use crate::user::{demo_token, LoginRequest, LoginResponse, NewUser, UserRole};

// ---------------------------------------------------------------------------
// Transition rule
// ---------------------------------------------------------------------------

/// Where an observation came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservationSource {
    /// Status-only mark from an operator.
    ManualMark,
    /// Full inspection submission with optional free-text detail.
    Inspection { detail: Option<String> },
}

impl ObservationSource {
    /// Detail stored on the inspection record.
    pub fn detail(&self) -> Option<String> {
        match self {
            ObservationSource::ManualMark => Some(MANUAL_MARK_DETAIL.to_string()),
            ObservationSource::Inspection { detail } => detail.clone(),
        }
    }

    /// Alert text for a faulty observation of `section_name`.
    pub fn alert_message(&self, section_name: &str) -> String {
        match self {
            ObservationSource::ManualMark => format!("Fault detected at section {section_name}."),
            ObservationSource::Inspection { .. } => {
                format!("Fault detected at section {section_name} (auto)")
            }
        }
    }
}

/// Compute the section update for an observation.
///
/// The counter only moves when a faulty observation lands on a section that
/// is already faulty. A safe observation never resets it.
pub fn plan_observation(
    current: &TrackSection,
    observed: TrackStatus,
    checked_at: Timestamp,
) -> SectionObservation {
    SectionObservation {
        status: observed,
        last_check: checked_at,
        updated_at: checked_at,
        increment_faults: current.status.is_faulty() && observed.is_faulty(),
    }
}

/// Outcome of a section patch.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOutcome {
    /// The patch carried no fields; nothing was looked up or written.
    Unchanged,
    Updated(TrackSection),
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Operations over sections, inspections and alerts, backed by a
/// [`TrackStore`]. Cheap to clone.
#[derive(Clone)]
pub struct SectionStatusEngine {
    store: Arc<dyn TrackStore>,
}

impl SectionStatusEngine {
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn TrackStore> {
        &self.store
    }

    async fn require_section(&self, id: DbId) -> Result<TrackSection, CoreError> {
        self.store
            .find_section(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Section",
                id,
            })
    }

    /// Record an observed status for a section.
    ///
    /// Steps: load the section (NotFound before any write), apply the
    /// transition, append the inspection, raise a `high` alert when the
    /// observation is faulty, then return the reloaded section.
    pub async fn record_observation(
        &self,
        section_id: DbId,
        observed: TrackStatus,
        source: ObservationSource,
    ) -> Result<TrackSection, CoreError> {
        let received_at = Utc::now();

        let current = self.require_section(section_id).await.inspect_err(|_| {
            tracing::warn!(%section_id, %observed, "Observation for unknown section");
        })?;

        let update = plan_observation(&current, observed, Utc::now());
        let matched = self.store.apply_observation(section_id, &update).await?;
        if matched == 0 {
            // Deleted between the load and the update.
            return Err(CoreError::NotFound {
                entity: "Section",
                id: section_id,
            });
        }

        let inspection = self
            .store
            .insert_inspection(NewInspection {
                section_id,
                status: observed,
                detail: source.detail(),
                inspected_at: Utc::now(),
                created_at: received_at,
            })
            .await
            .inspect_err(|err| {
                tracing::error!(
                    %section_id,
                    error = %err,
                    "Section updated but inspection insert failed",
                );
            })?;

        if observed.is_faulty() {
            let alert = self
                .store
                .insert_alert(NewAlert {
                    section_id,
                    message: source.alert_message(&current.name),
                    severity: AlertSeverity::High,
                    created_at: received_at,
                })
                .await?;
            tracing::warn!(
                %section_id,
                alert_id = %alert.id,
                repeat_fault = update.increment_faults,
                "Fault alert raised",
            );
        }

        tracing::info!(
            %section_id,
            inspection_id = %inspection.id,
            from = %current.status,
            to = %observed,
            "Observation recorded",
        );

        self.require_section(section_id).await
    }

    /// Patch free-form section attributes.
    ///
    /// A status set here bypasses the fault-accumulation rule entirely.
    pub async fn patch_section(
        &self,
        section_id: DbId,
        fields: UpdateSection,
    ) -> Result<PatchOutcome, CoreError> {
        if fields.is_empty() {
            return Ok(PatchOutcome::Unchanged);
        }

        let patch = SectionPatch {
            fields,
            updated_at: Utc::now(),
        };
        let matched = self.store.patch_section(section_id, &patch).await?;
        if matched == 0 {
            return Err(CoreError::NotFound {
                entity: "Section",
                id: section_id,
            });
        }

        tracing::info!(%section_id, "Section patched");
        self.require_section(section_id).await.map(PatchOutcome::Updated)
    }

    /// Section counts by status, plus sections at or above the critical
    /// fault threshold.
    pub async fn summarize(&self) -> Result<Summary, CoreError> {
        Ok(Summary {
            total: self.store.count_sections(SectionFilter::All).await?,
            safe: self
                .store
                .count_sections(SectionFilter::Status(TrackStatus::Safe))
                .await?,
            faulty: self
                .store
                .count_sections(SectionFilter::Status(TrackStatus::Faulty))
                .await?,
            critical: self
                .store
                .count_sections(SectionFilter::MinPersistentFaults(CRITICAL_FAULT_THRESHOLD))
                .await?,
        })
    }

    /// Mark an alert acknowledged. Acknowledging twice is not an error.
    pub async fn acknowledge_alert(&self, alert_id: DbId) -> Result<(), CoreError> {
        let matched = self.store.acknowledge_alert(alert_id).await?;
        if matched == 0 {
            return Err(CoreError::NotFound {
                entity: "Alert",
                id: alert_id,
            });
        }
        tracing::info!(%alert_id, "Alert acknowledged");
        Ok(())
    }

    pub async fn create_section(&self, input: &CreateSection) -> Result<TrackSection, CoreError> {
        let section = self.store.insert_section(input, Utc::now()).await?;
        tracing::info!(section_id = %section.id, name = %section.name, "Section created");
        Ok(section)
    }

    pub async fn list_sections(&self) -> Result<Vec<TrackSection>, CoreError> {
        self.store.list_sections().await
    }

    /// Delete a section. Its inspections and alerts are kept.
    pub async fn delete_section(&self, section_id: DbId) -> Result<(), CoreError> {
        let deleted = self.store.delete_section(section_id).await?;
        if deleted == 0 {
            return Err(CoreError::NotFound {
                entity: "Section",
                id: section_id,
            });
        }
        tracing::info!(%section_id, "Section deleted");
        Ok(())
    }

    pub async fn list_inspections(
        &self,
        filter: InspectionFilter,
    ) -> Result<Vec<Inspection>, CoreError> {
        tracing::debug!(section_id = ?filter.section_id, limit = filter.limit, "Listing inspections");
        self.store.list_inspections(filter).await
    }

    pub async fn list_alerts(&self, filter: AlertFilter) -> Result<Vec<Alert>, CoreError> {
        tracing::debug!(only_open = filter.only_open, limit = filter.limit, "Listing alerts");
        self.store.list_alerts(filter).await
    }

    /// Demo login: register the email on first use, refresh its token
    /// otherwise.
    pub async fn login(&self, input: &LoginRequest) -> Result<LoginResponse, CoreError> {
        let token = demo_token(&input.email);

        match self.store.find_user_by_email(&input.email).await? {
            Some(user) => {
                self.store.update_user_token(user.id, &token).await?;
                tracing::info!(user_id = %user.id, "Demo login refreshed token");
            }
            None => {
                let user = self
                    .store
                    .insert_user(NewUser {
                        name: input.name.clone(),
                        email: input.email.clone(),
                        role: UserRole::Viewer,
                        token: token.clone(),
                        created_at: Utc::now(),
                    })
                    .await?;
                tracing::info!(user_id = %user.id, "Demo login registered user");
            }
        }

        Ok(LoginResponse {
            name: input.name.clone(),
            email: input.email.clone(),
            token,
        })
    }

    /// Store connectivity, for the health endpoint.
    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.store.ping().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
