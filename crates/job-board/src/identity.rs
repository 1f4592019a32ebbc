//! Caller identity and request timestamps.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque token identifying the calling party across requests.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub String);

impl Identity {
    pub const ANONYMOUS: &'static str = "anonymous";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn to_datetime(self) -> DateTime<Utc> {
        let nanos = i64::try_from(self.0).unwrap_or(i64::MAX);
        DateTime::from_timestamp_nanos(nanos)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_datetime().to_rfc3339())
    }
}

/// Who is acting and when, fixed for the duration of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    identity: Identity,
    now: Timestamp,
}

impl CallerContext {
    pub fn new(identity: Identity, now: Timestamp) -> Self {
        Self { identity, now }
    }

    pub fn current_identity(&self) -> &Identity {
        &self.identity
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }
}

/// Source of mutation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock that never runs backwards, even if the system time is adjusted.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = Utc::now()
            .timestamp_nanos_opt()
            .and_then(|nanos| u64::try_from(nanos).ok())
            .unwrap_or(0);
        let previous = self.last.fetch_max(wall, Ordering::AcqRel);
        Timestamp(previous.max(wall))
    }
}

/// Hand-driven clock for tests and demos.
#[derive(Debug, Default)]
pub struct ManualClock {
    current: AtomicU64,
}

impl ManualClock {
    pub fn starting_at(start: u64) -> Self {
        Self {
            current: AtomicU64::new(start),
        }
    }

    pub fn advance(&self, nanos: u64) {
        self.current.fetch_add(nanos, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.current.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_non_decreasing() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::starting_at(10);
        assert_eq!(clock.now(), Timestamp(10));
        clock.advance(5);
        assert_eq!(clock.now(), Timestamp(15));
    }

    #[test]
    fn context_exposes_identity_and_time() {
        let ctx = CallerContext::new(Identity::new("alice"), Timestamp(42));
        assert_eq!(ctx.current_identity().as_str(), "alice");
        assert_eq!(ctx.now(), Timestamp(42));
    }
}
