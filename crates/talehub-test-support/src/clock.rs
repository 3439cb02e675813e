//! Fixed clock for deterministic timestamps in tests.

use chrono::{DateTime, Utc};
use talehub_core::clock::Clock;

/// A clock that always returns the wrapped instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
