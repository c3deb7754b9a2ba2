//! Clock provider.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current time.
///
/// The fixture-date gate compares calendar dates in the scanner's local
/// zone (a ticket stays valid through the whole match day), while the
/// subscription window compares instants. Both come from this seam so
/// tests can pin them.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date, local to the deployment.
    fn today(&self) -> NaiveDate;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
