//! Safety status of a track section.
//!
//! A section is either `safe` or `faulty`; the lowercase string form is what
//! is stored in the database and exchanged over HTTP.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Observed or current status of a track section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatus {
    #[default]
    Safe,
    Faulty,
}

impl TrackStatus {
    /// All statuses, in display order.
    pub const ALL: [TrackStatus; 2] = [TrackStatus::Safe, TrackStatus::Faulty];

    /// Storage / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TrackStatus::Safe => "safe",
            TrackStatus::Faulty => "faulty",
        }
    }

    pub fn is_faulty(self) -> bool {
        self == TrackStatus::Faulty
    }
}

impl fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(TrackStatus::Safe),
            "faulty" => Ok(TrackStatus::Faulty),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: safe, faulty"
            ))),
        }
    }
}
