//! Domain layer for the railway track inspection service.
//!
//! Holds the section/inspection/alert types, the [`store::TrackStore`]
//! collaborator contract and the [`engine::SectionStatusEngine`] that owns
//! the status-transition and fault-accumulation rules.

pub mod alert;
pub mod engine;
pub mod error;
pub mod ids;
pub mod inspection;
pub mod limits;
pub mod section;
pub mod status;
pub mod store;
pub mod summary;
pub mod types;
pub mod user;
