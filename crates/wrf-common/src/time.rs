//! WRF date-time strings.
//!
//! WRF namelists carry run start/end times as `YYYY-MM-DD_HH:MM:SS`.
//! The grid tools copy these strings verbatim between domains; parsing is
//! only used for reporting.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date-time format used in WRF namelists.
pub const WRF_DATE_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

/// A parsed WRF date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WrfDateTime(pub NaiveDateTime);

impl WrfDateTime {
    /// Parse a WRF date string such as `2024-01-15_12:00:00`.
    ///
    /// ISO 8601 with a `T` separator is accepted too.
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        let s = s.trim();
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, WRF_DATE_FORMAT) {
            return Ok(Self(ndt));
        }

        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Self(ndt));
        }

        Err(TimeParseError::InvalidFormat(s.to_string()))
    }

    /// Duration from `self` until `end`.
    pub fn until(&self, end: &WrfDateTime) -> Duration {
        end.0 - self.0
    }

    /// Format back to the namelist representation.
    pub fn to_wrf_string(&self) -> String {
        self.0.format(WRF_DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for WrfDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wrf_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid WRF date-time: {0}. Expected 'YYYY-MM-DD_HH:MM:SS'")]
    InvalidFormat(String),
}
