//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by subtracting the specified number of minutes.
    pub fn minus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 - Duration::minutes(minutes))
    }

    /// Human-readable age relative to `now`, as shown on cards ("2 hours ago").
    pub fn relative_to(&self, now: &Timestamp) -> String {
        let elapsed = now.duration_since(self);
        if elapsed.num_minutes() < 1 {
            return "just now".to_string();
        }

        let (value, unit) = if elapsed.num_hours() < 1 {
            (elapsed.num_minutes(), "minute")
        } else if elapsed.num_days() < 1 {
            (elapsed.num_hours(), "hour")
        } else if elapsed.num_weeks() < 1 {
            (elapsed.num_days(), "day")
        } else {
            (elapsed.num_weeks(), "week")
        };

        if value == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", value, unit)
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn fixed() -> Timestamp {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Timestamp::from_datetime(dt)
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts.as_datetime().year(), 2024);
    }

    #[test]
    fn minus_minutes_is_before() {
        let now = fixed();
        assert!(now.minus_minutes(5).is_before(&now));
    }

    #[test]
    fn relative_to_formats_each_unit() {
        let now = fixed();
        assert_eq!(now.relative_to(&now), "just now");
        assert_eq!(now.minus_minutes(1).relative_to(&now), "1 minute ago");
        assert_eq!(now.minus_minutes(45).relative_to(&now), "45 minutes ago");
        assert_eq!(now.minus_minutes(120).relative_to(&now), "2 hours ago");
        assert_eq!(now.minus_minutes(60 * 24).relative_to(&now), "1 day ago");
        assert_eq!(now.minus_minutes(60 * 24 * 15).relative_to(&now), "2 weeks ago");
    }
}
