//! Fixed time-to-live and time-remaining arithmetic.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use shortshare_core::config::ShareConfig;

/// Time left before a share expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Remaining {
    /// No whole second is left.
    Expired,
    /// Time left, split into display components.
    Left {
        /// Whole hours; unbounded.
        hours: u64,
        /// Minutes, 0..60.
        minutes: u8,
        /// Seconds, 0..60.
        seconds: u8,
    },
}

impl Remaining {
    /// Split a positive number of seconds; zero or less is `Expired`.
    pub fn from_seconds(total: i64) -> Self {
        if total <= 0 {
            return Self::Expired;
        }
        let total = total as u64;
        Self::Left {
            hours: total / 3600,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    /// Whole seconds left; zero once expired.
    pub fn total_seconds(&self) -> u64 {
        match *self {
            Self::Expired => 0,
            Self::Left {
                hours,
                minutes,
                seconds,
            } => hours * 3600 + u64::from(minutes) * 60 + u64::from(seconds),
        }
    }

    /// Whether nothing is left.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl std::fmt::Display for Remaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expired => write!(f, "Expired"),
            Self::Left {
                hours,
                minutes,
                seconds,
            } => write!(f, "{hours:02}:{minutes:02}:{seconds:02}"),
        }
    }
}

/// Every share lives for the same fixed TTL from its creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    ttl: Duration,
}

impl ExpiryPolicy {
    /// Policy with a TTL of `ttl_seconds`.
    pub fn new(ttl_seconds: u64) -> Self {
        let seconds = i64::try_from(ttl_seconds)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        Self {
            ttl: Duration::seconds(seconds),
        }
    }

    /// Policy from the share configuration section.
    pub fn from_config(config: &ShareConfig) -> Self {
        Self::new(config.ttl_seconds)
    }

    /// The TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The TTL in whole seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Expiry of a share created at `created_at`.
    pub fn expires_at_for(&self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + self.ttl
    }

    /// Whether `expires_at` has been reached at `now`.
    pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        expires_at <= now
    }

    /// Time left until `expires_at`, truncated to whole seconds.
    pub fn remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Remaining {
        Remaining::from_seconds((expires_at - now).num_seconds())
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::from_config(&ShareConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_components_reconstruct_total() {
        let now = Utc::now();
        for secs in [1_i64, 59, 60, 61, 3599, 3600, 7199, 7200, 90_061, 400_000] {
            let remaining = ExpiryPolicy::remaining(now + Duration::seconds(secs), now);
            let Remaining::Left {
                hours,
                minutes,
                seconds,
            } = remaining
            else {
                panic!("{secs}s should not be expired");
            };
            assert!(minutes < 60 && seconds < 60);
            assert_eq!(
                hours * 3600 + u64::from(minutes) * 60 + u64::from(seconds),
                secs as u64
            );
            assert_eq!(remaining.total_seconds(), secs as u64);
        }
    }

    #[test]
    fn test_past_or_now_is_expired() {
        let now = Utc::now();
        assert_eq!(ExpiryPolicy::remaining(now, now), Remaining::Expired);
        assert_eq!(
            ExpiryPolicy::remaining(now - Duration::hours(5), now),
            Remaining::Expired
        );
        assert!(ExpiryPolicy::is_expired(now, now));
        assert!(!ExpiryPolicy::is_expired(now + Duration::seconds(1), now));
    }

    #[test]
    fn test_subsecond_remainder_is_truncated() {
        let now = Utc::now();
        let remaining = ExpiryPolicy::remaining(now + Duration::milliseconds(1999), now);
        assert_eq!(remaining.total_seconds(), 1);
        assert_eq!(
            ExpiryPolicy::remaining(now + Duration::milliseconds(999), now),
            Remaining::Expired
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Remaining::from_seconds(7200).to_string(), "02:00:00");
        assert_eq!(Remaining::from_seconds(3723).to_string(), "01:02:03");
        assert_eq!(Remaining::from_seconds(360_000).to_string(), "100:00:00");
        assert_eq!(Remaining::from_seconds(0).to_string(), "Expired");
    }

    #[test]
    fn test_default_ttl_is_two_hours() {
        let policy = ExpiryPolicy::default();
        let created = Utc::now();
        assert_eq!(policy.ttl_seconds(), 7200);
        assert_eq!(policy.expires_at_for(created) - created, Duration::hours(2));
    }
}
