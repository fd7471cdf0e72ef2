/// All primary keys are UUIDs, generated time-ordered (v7) by the store.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
