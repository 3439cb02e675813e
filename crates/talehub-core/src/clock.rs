//! Clock abstraction.
//!
//! Timestamps stamped onto documents (`created_at`, `updated_at`,
//! `cloned_at`, `submitted_at`) all flow through this trait so tests can
//! pin time.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
