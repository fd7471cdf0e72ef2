//! Alerts raised by faulty observations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Alert severity. Faulty observations always raise [`AlertSeverity::High`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    #[default]
    High,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertSeverity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AlertSeverity::Low),
            "medium" => Ok(AlertSeverity::Medium),
            "high" => Ok(AlertSeverity::High),
            "critical" => Ok(AlertSeverity::Critical),
            other => Err(CoreError::Validation(format!(
                "Invalid alert severity '{other}'"
            ))),
        }
    }
}

/// An alert awaiting (or having received) acknowledgement.
///
/// Alerts are never resolved automatically; only acknowledgement mutates them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub section_id: DbId,
    pub message: String,
    pub severity: AlertSeverity,
    pub acknowledged: bool,
    pub created_at: Timestamp,
}

/// Insert payload for an alert. New alerts are unacknowledged.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub section_id: DbId,
    pub message: String,
    pub severity: AlertSeverity,
    pub created_at: Timestamp,
}

/// Listing filter, newest first.
#[derive(Debug, Clone, Copy)]
pub struct AlertFilter {
    /// Only unacknowledged alerts.
    pub only_open: bool,
    pub limit: i64,
}
