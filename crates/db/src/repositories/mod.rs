//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument and return row models.

pub mod alert_repo;
pub mod inspection_repo;
pub mod section_repo;
pub mod user_repo;

pub use alert_repo::AlertRepo;
pub use inspection_repo::InspectionRepo;
pub use section_repo::SectionRepo;
pub use user_repo::UserRepo;
