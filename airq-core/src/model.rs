use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::Severity;

/// A single PM2.5 observation as returned by the upstream API.
///
/// Ephemeral: only its value (plus the originating location and timestamp)
/// ever reaches the history file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirQualityReading {
    /// Particulate-matter concentration in µg/m³.
    pub pm2_5: f64,
}

impl AirQualityReading {
    pub fn severity(&self) -> Severity {
        Severity::classify(self.pm2_5)
    }
}

/// One stored reading. Immutable once written; duplicates are permitted.
///
/// On-disk JSON keys:
/// `{"location": "...", "pm25Value": 8.5, "date": "2026-08-26T12:00:00Z"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub location: String,
    #[serde(rename = "pm25Value")]
    pub pm25_value: f64,
    pub date: DateTime<Utc>,
}
