//! # UTC Timestamps
//!
//! `Timestamp` is a UTC-only instant truncated to seconds. Submissions are
//! stamped with it.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-10-16T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(Timestamp::now().0.nanosecond(), 0);
    }

    #[test]
    fn truncation_drops_subseconds() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 45).unwrap();
        let ts = Timestamp(truncate_to_seconds(dt.with_nanosecond(987_654_321).unwrap()));
        assert_eq!(ts.to_iso8601(), "2026-10-16T09:30:45Z");
    }

    #[test]
    fn display_is_iso8601_with_z() {
        let ts = Timestamp::now();
        let text = ts.to_string();
        assert!(text.ends_with('Z'));
        assert_eq!(text.len(), "2026-10-16T12:00:00Z".len());
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }
}
