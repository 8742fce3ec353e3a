//! Port traits for injecting external effects.
//!
//! Only time is abstracted: everything else in the engine is in-process.

use chrono::{DateTime, Utc};

/// Source of the current wall-clock time.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
