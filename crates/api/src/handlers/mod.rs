pub mod alerts;
pub mod auth;
pub mod export;
pub mod inspections;
pub mod sections;
pub mod summary;
