//! Integration tests for the PostgreSQL track store.
//!
//! Exercises the repositories through [`PgStore`] and the status engine
//! against a real database:
//! - Section create / patch / delete and name ordering
//! - In-place fault increment and the observation sequence
//! - Orphaned inspections and alerts after a section delete
//! - Alert acknowledgement matched counts
//! - Demo user upsert

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Utc;
use railtrack_core::alert::AlertFilter;
use railtrack_core::engine::{ObservationSource, PatchOutcome, SectionStatusEngine};
use railtrack_core::error::CoreError;
use railtrack_core::inspection::InspectionFilter;
use railtrack_core::section::{CreateSection, SectionFilter, SectionObservation, UpdateSection};
use railtrack_core::status::TrackStatus;
use railtrack_core::store::TrackStore;
use railtrack_core::user::LoginRequest;
use railtrack_db::PgStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn engine(pool: PgPool) -> SectionStatusEngine {
    SectionStatusEngine::new(Arc::new(PgStore::new(pool)))
}

fn all_inspections() -> InspectionFilter {
    InspectionFilter {
        section_id: None,
        limit: 100,
    }
}

fn all_alerts() -> AlertFilter {
    AlertFilter {
        only_open: false,
        limit: 100,
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_section_defaults(pool: PgPool) {
    let store = PgStore::new(pool);
    let section = store
        .insert_section(&CreateSection::named("S1"), Utc::now())
        .await
        .unwrap();

    assert_eq!(section.name, "S1");
    assert_eq!(section.status, TrackStatus::Safe);
    assert_eq!(section.persistent_faults, 0);
    assert_eq!(section.color_safe, "#16a34a");
    assert_eq!(section.color_faulty, "#dc2626");
    assert!(section.last_check.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_sections_ordered_by_name(pool: PgPool) {
    let store = PgStore::new(pool);
    for name in ["Yard-2", "Depot", "S1"] {
        store
            .insert_section(&CreateSection::named(name), Utc::now())
            .await
            .unwrap();
    }

    let names: Vec<String> = store
        .list_sections()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Depot", "S1", "Yard-2"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_observation_increments_in_place(pool: PgPool) {
    let store = PgStore::new(pool);
    let section = store
        .insert_section(&CreateSection::named("S1"), Utc::now())
        .await
        .unwrap();
    let update = SectionObservation {
        status: TrackStatus::Faulty,
        last_check: Utc::now(),
        updated_at: Utc::now(),
        increment_faults: true,
    };

    assert_eq!(store.apply_observation(section.id, &update).await.unwrap(), 1);
    assert_eq!(store.apply_observation(section.id, &update).await.unwrap(), 1);

    let reloaded = store.find_section(section.id).await.unwrap().unwrap();
    assert_eq!(reloaded.persistent_faults, 2);
    assert_eq!(reloaded.status, TrackStatus::Faulty);
    assert!(reloaded.last_check.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_observation_on_missing_section_matches_nothing(pool: PgPool) {
    let store = PgStore::new(pool);
    let update = SectionObservation {
        status: TrackStatus::Safe,
        last_check: Utc::now(),
        updated_at: Utc::now(),
        increment_faults: false,
    };
    let matched = store
        .apply_observation(uuid::Uuid::now_v7(), &update)
        .await
        .unwrap();
    assert_eq!(matched, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_count_sections_by_filter(pool: PgPool) {
    let engine = engine(pool);
    engine.create_section(&CreateSection::named("A")).await.unwrap();
    let b = engine.create_section(&CreateSection::named("B")).await.unwrap();
    for _ in 0..4 {
        engine
            .record_observation(b.id, TrackStatus::Faulty, ObservationSource::ManualMark)
            .await
            .unwrap();
    }

    let store = engine.store();
    assert_eq!(store.count_sections(SectionFilter::All).await.unwrap(), 2);
    assert_eq!(
        store
            .count_sections(SectionFilter::Status(TrackStatus::Faulty))
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        store
            .count_sections(SectionFilter::MinPersistentFaults(3))
            .await
            .unwrap(),
        1
    );

    let summary = engine.summarize().await.unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.safe, 1);
    assert_eq!(summary.faulty, 1);
    assert_eq!(summary.critical, 1);
}

// ---------------------------------------------------------------------------
// Observation sequence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_repeat_fault_sequence(pool: PgPool) {
    let engine = engine(pool);
    let section = engine.create_section(&CreateSection::named("S1")).await.unwrap();

    let first = engine
        .record_observation(section.id, TrackStatus::Faulty, ObservationSource::ManualMark)
        .await
        .unwrap();
    let second = engine
        .record_observation(
            section.id,
            TrackStatus::Faulty,
            ObservationSource::Inspection {
                detail: Some("rail break".into()),
            },
        )
        .await
        .unwrap();
    let third = engine
        .record_observation(section.id, TrackStatus::Safe, ObservationSource::ManualMark)
        .await
        .unwrap();

    assert_eq!(first.persistent_faults, 0);
    assert_eq!(second.persistent_faults, 1);
    assert_eq!(third.persistent_faults, 1);
    assert_eq!(third.status, TrackStatus::Safe);

    let inspections = engine
        .list_inspections(InspectionFilter {
            section_id: Some(section.id),
            limit: 10,
        })
        .await
        .unwrap();
    assert_eq!(inspections.len(), 3);
    assert_eq!(inspections[0].status, TrackStatus::Safe);
    assert_eq!(inspections[1].detail.as_deref(), Some("rail break"));

    let alerts = engine.list_alerts(all_alerts()).await.unwrap();
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| !a.acknowledged));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_patch_status_does_not_touch_faults(pool: PgPool) {
    let engine = engine(pool);
    let section = engine.create_section(&CreateSection::named("S1")).await.unwrap();
    engine
        .record_observation(section.id, TrackStatus::Faulty, ObservationSource::ManualMark)
        .await
        .unwrap();

    let outcome = engine
        .patch_section(
            section.id,
            UpdateSection {
                status: Some(TrackStatus::Faulty),
                color_faulty: Some("#ff0000".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let patched = assert_matches!(outcome, PatchOutcome::Updated(s) => s);
    assert_eq!(patched.persistent_faults, 0);
    assert_eq!(patched.color_faulty, "#ff0000");
    assert_eq!(patched.name, "S1");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_keeps_inspections_and_alerts(pool: PgPool) {
    let engine = engine(pool);
    let section = engine.create_section(&CreateSection::named("S1")).await.unwrap();
    engine
        .record_observation(section.id, TrackStatus::Faulty, ObservationSource::ManualMark)
        .await
        .unwrap();

    engine.delete_section(section.id).await.unwrap();

    assert!(engine.store().find_section(section.id).await.unwrap().is_none());
    assert_eq!(engine.list_inspections(all_inspections()).await.unwrap().len(), 1);
    assert_eq!(engine.list_alerts(all_alerts()).await.unwrap().len(), 1);
    assert_matches!(
        engine.delete_section(section.id).await,
        Err(CoreError::NotFound { entity: "Section", .. })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_observation_on_missing_section_writes_nothing(pool: PgPool) {
    let engine = engine(pool);
    let result = engine
        .record_observation(
            uuid::Uuid::now_v7(),
            TrackStatus::Faulty,
            ObservationSource::ManualMark,
        )
        .await;

    assert_matches!(result, Err(CoreError::NotFound { .. }));
    assert!(engine.list_inspections(all_inspections()).await.unwrap().is_empty());
    assert!(engine.list_alerts(all_alerts()).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_acknowledge_reports_matched_rows(pool: PgPool) {
    let engine = engine(pool);
    let section = engine.create_section(&CreateSection::named("S1")).await.unwrap();
    engine
        .record_observation(section.id, TrackStatus::Faulty, ObservationSource::ManualMark)
        .await
        .unwrap();
    let alert_id = engine.list_alerts(all_alerts()).await.unwrap()[0].id;

    let store = engine.store();
    assert_eq!(store.acknowledge_alert(alert_id).await.unwrap(), 1);
    assert_eq!(store.acknowledge_alert(alert_id).await.unwrap(), 1);
    assert_eq!(
        store.acknowledge_alert(uuid::Uuid::now_v7()).await.unwrap(),
        0
    );

    let open = engine
        .list_alerts(AlertFilter {
            only_open: true,
            limit: 100,
        })
        .await
        .unwrap();
    assert!(open.is_empty());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_login_upserts_single_user(pool: PgPool) {
    let engine = engine(pool.clone());
    let request = LoginRequest {
        name: "Ops".into(),
        email: "ops@example.com".into(),
    };

    let first = engine.login(&request).await.unwrap();
    let second = engine.login(&request).await.unwrap();
    assert_eq!(first.token, second.token);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
