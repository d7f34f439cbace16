// Time source for cache stamping and date-keyed picks.
// Injected so TTL expiry and day rollover can be driven from tests.

use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current wall-clock time as the viewer sees it.
    fn now_local(&self) -> NaiveDateTime;

    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Current calendar date as the viewer sees it.
    fn today(&self) -> NaiveDate {
        self.now_local().date()
    }
}

/// Wall clock; dates are taken in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Hand-driven clock. Local time is the held instant in UTC.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn now_local(&self) -> NaiveDateTime {
        self.now().naive_utc()
    }
}
