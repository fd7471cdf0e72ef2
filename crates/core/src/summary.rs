use serde::Serialize;

/// Section counts for the dashboard header.
///
/// `critical` counts sections whose `persistent_faults` reached
/// [`crate::section::CRITICAL_FAULT_THRESHOLD`], regardless of current status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: i64,
    pub safe: i64,
    pub faulty: i64,
    pub critical: i64,
}
