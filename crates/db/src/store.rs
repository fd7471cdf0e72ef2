//! [`TrackStore`] backed by PostgreSQL.

use async_trait::async_trait;
use railtrack_core::alert::{Alert, AlertFilter, NewAlert};
use railtrack_core::error::CoreError;
use railtrack_core::inspection::{Inspection, InspectionFilter, NewInspection};
use railtrack_core::section::{
    CreateSection, SectionFilter, SectionObservation, SectionPatch, TrackSection,
};
use railtrack_core::store::{StoreResult, TrackStore};
use railtrack_core::types::{DbId, Timestamp};
use railtrack_core::user::{NewUser, User};

use crate::repositories::{AlertRepo, InspectionRepo, SectionRepo, UserRepo};
use crate::DbPool;

/// Store handle shared by all requests. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a database failure to the domain's internal error.
fn db_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}

fn convert_all<R, T>(rows: Vec<R>) -> StoreResult<Vec<T>>
where
    T: TryFrom<R, Error = CoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[async_trait]
impl TrackStore for PgStore {
    async fn insert_section(
        &self,
        input: &CreateSection,
        now: Timestamp,
    ) -> StoreResult<TrackSection> {
        SectionRepo::create(&self.pool, input, now)
            .await
            .map_err(db_error)?
            .try_into()
    }

    async fn find_section(&self, id: DbId) -> StoreResult<Option<TrackSection>> {
        SectionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(db_error)?
            .map(TrackSection::try_from)
            .transpose()
    }

    async fn list_sections(&self) -> StoreResult<Vec<TrackSection>> {
        let rows = SectionRepo::list_by_name(&self.pool).await.map_err(db_error)?;
        convert_all(rows)
    }

    async fn apply_observation(&self, id: DbId, update: &SectionObservation) -> StoreResult<u64> {
        SectionRepo::apply_observation(&self.pool, id, update)
            .await
            .map_err(db_error)
    }

    async fn patch_section(&self, id: DbId, patch: &SectionPatch) -> StoreResult<u64> {
        SectionRepo::patch(&self.pool, id, patch)
            .await
            .map_err(db_error)
    }

    async fn delete_section(&self, id: DbId) -> StoreResult<u64> {
        SectionRepo::delete(&self.pool, id).await.map_err(db_error)
    }

    async fn count_sections(&self, filter: SectionFilter) -> StoreResult<i64> {
        SectionRepo::count(&self.pool, filter).await.map_err(db_error)
    }

    async fn insert_inspection(&self, input: NewInspection) -> StoreResult<Inspection> {
        InspectionRepo::create(&self.pool, &input)
            .await
            .map_err(db_error)?
            .try_into()
    }

    async fn list_inspections(&self, filter: InspectionFilter) -> StoreResult<Vec<Inspection>> {
        let rows = InspectionRepo::list(&self.pool, &filter)
            .await
            .map_err(db_error)?;
        convert_all(rows)
    }

    async fn insert_alert(&self, input: NewAlert) -> StoreResult<Alert> {
        AlertRepo::create(&self.pool, &input)
            .await
            .map_err(db_error)?
            .try_into()
    }

    async fn list_alerts(&self, filter: AlertFilter) -> StoreResult<Vec<Alert>> {
        let rows = AlertRepo::list(&self.pool, &filter).await.map_err(db_error)?;
        convert_all(rows)
    }

    async fn acknowledge_alert(&self, id: DbId) -> StoreResult<u64> {
        AlertRepo::acknowledge(&self.pool, id).await.map_err(db_error)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        UserRepo::find_by_email(&self.pool, email)
            .await
            .map_err(db_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn insert_user(&self, input: NewUser) -> StoreResult<User> {
        UserRepo::create(&self.pool, &input)
            .await
            .map_err(db_error)?
            .try_into()
    }

    async fn update_user_token(&self, id: DbId, token: &str) -> StoreResult<u64> {
        UserRepo::update_token(&self.pool, id, token)
            .await
            .map_err(db_error)
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(db_error)
    }
}
