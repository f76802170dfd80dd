//! Clock abstraction so timestamps stay deterministic under test.

use chrono::{DateTime, Utc};

/// Source of "now" for `viewed_at`, `completion_date` and purchase dates.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used by the server binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
