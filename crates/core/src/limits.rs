//! Listing limits shared by the API and the store implementations.

/// Default number of inspections returned by a listing.
pub const DEFAULT_INSPECTION_LIMIT: i64 = 50;
/// Upper bound for an inspection listing.
pub const MAX_INSPECTION_LIMIT: i64 = 1_000;

/// Number of alerts returned by a listing.
pub const DEFAULT_ALERT_LIMIT: i64 = 100;

/// Default number of inspections written to a CSV export.
pub const DEFAULT_EXPORT_LIMIT: i64 = 1_000;
/// Upper bound for a CSV export.
pub const MAX_EXPORT_LIMIT: i64 = 10_000;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}
