//! Clock implementations.

use crate::infrastructure::ports::ClockPort;
use chrono::{DateTime, Utc};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl FixedClock {
    /// Clock pinned to the given Unix timestamp.
    pub fn at(timestamp: i64) -> Self {
        use chrono::TimeZone;
        Self(Utc.timestamp_opt(timestamp, 0).single().unwrap_or_default())
    }
}

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
