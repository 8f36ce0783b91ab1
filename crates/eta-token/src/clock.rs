//! Time sources used for issuing and checking token expiry.
//!
//! A [`Maker`](crate::Maker) reads the current time from exactly one [`Clock`],
//! for both issuance and verification. Production code uses [`SystemClock`];
//! tests use [`ManualClock`] to move time forward without sleeping.
//!
//! Makers running in separate processes each read their own wall clock. No
//! skew between hosts is compensated for.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock.
///
/// Clones share the same instant, so a test can hand one clone to a Maker and
/// advance time through another.
///
/// ```
/// use chrono::Duration;
/// use eta_token::{Clock, ManualClock};
///
/// let clock = ManualClock::from_system_time();
/// let start = clock.now();
/// clock.advance(Duration::seconds(61));
/// assert_eq!(clock.now() - start, Duration::seconds(61));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Create a clock frozen at the current wall-clock time.
    pub fn from_system_time() -> Self {
        Self::new(Utc::now())
    }

    /// Move the clock by `delta` (which may be negative).
    pub fn advance(&self, delta: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(next) = current.checked_add_signed(delta) {
            *current = next;
        }
    }

    /// Set the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(|p| p.into_inner()) = instant;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::from_system_time()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|p| p.into_inner())
    }
}
