//! Fixed clock for testing.

use crate::providers::Clock;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// A clock pinned to a configured instant and calendar date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    /// Create a clock pinned to `now`, with "today" derived from the same
    /// instant (UTC calendar date).
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            today: now.date_naive(),
        }
    }

    /// Override the calendar date independently of the instant.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Default for FixedClock {
    /// Pinned to 2025-06-15 12:00:00 UTC, a mid-season Sunday.
    fn default() -> Self {
        Self::new(
            Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
