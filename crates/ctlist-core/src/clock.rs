//! Time source for disqualification checks.
//!
//! The converter never reads wall time itself; callers inject a [`Clock`]
//! so conversion is reproducible in tests and re-runs.

use chrono::Utc;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in seconds.
    fn now_secs(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to a fixed timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub timestamp: i64,
}

impl FixedClock {
    #[must_use]
    pub const fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }
}

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.timestamp
    }
}
