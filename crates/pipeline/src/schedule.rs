//! Scheduling declarations: run interval and start date.

use chrono::{DateTime, Days, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Fixed interval between scheduled runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Seconds between runs.
    pub interval_secs: u64,
}

impl Schedule {
    /// One run per day.
    #[must_use]
    pub const fn daily() -> Self {
        Self {
            interval_secs: 86_400,
        }
    }

    /// One run per hour.
    #[must_use]
    pub const fn hourly() -> Self {
        Self {
            interval_secs: 3_600,
        }
    }

    #[must_use]
    pub const fn every_secs(interval_secs: u64) -> Self {
        Self { interval_secs }
    }

    /// Interval as a chrono duration, saturating at the representable maximum.
    #[must_use]
    pub fn interval(&self) -> Duration {
        i64::try_from(self.interval_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

/// When a dag becomes eligible for scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StartDate {
    /// An absolute instant.
    Fixed { at: DateTime<Utc> },
    /// Midnight UTC the given number of days before evaluation time.
    DaysAgo { days: u32 },
}

impl StartDate {
    #[must_use]
    pub const fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed { at }
    }

    #[must_use]
    pub const fn days_ago(days: u32) -> Self {
        Self::DaysAgo { days }
    }

    /// Resolves to an absolute instant, anchoring relative variants at `now`.
    #[must_use]
    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Self::Fixed { at } => at,
            Self::DaysAgo { days } => {
                let date = now.date_naive() - Days::new(u64::from(days));
                Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_interval() {
        assert_eq!(Schedule::daily().interval(), Duration::days(1));
        assert_eq!(Schedule::hourly().interval(), Duration::hours(1));
    }

    #[test]
    fn test_oversized_interval_saturates() {
        assert_eq!(Schedule::every_secs(u64::MAX).interval(), Duration::MAX);
        assert_eq!(
            Schedule::every_secs(u64::try_from(i64::MAX).unwrap()).interval(),
            Duration::MAX
        );
    }

    #[test]
    fn test_days_ago_resolves_to_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 15, 30, 45).unwrap();
        let resolved = StartDate::days_ago(2).resolve(now);
        assert_eq!(resolved, Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_days_ago_crosses_month_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let resolved = StartDate::days_ago(2).resolve(now);
        // 2024 is a leap year
        assert_eq!(
            resolved,
            Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_fixed_ignores_now() {
        let at = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(StartDate::fixed(at).resolve(now), at);
    }

    #[test]
    fn test_start_date_serialization() {
        let json = serde_json::to_value(StartDate::days_ago(2)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "days_ago", "days": 2}));
    }
}
