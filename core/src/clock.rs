//! Wall clock access, used for one thing only: the day-bucket.
//!
//! RULE: Nothing else in the core reads the time.
//! Every synthesized figure changes once per UTC day and is
//! stable for the rest of that day.

use crate::types::DayBucket;
use chrono::{DateTime, NaiveDate, Utc};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// `floor(unix_ms / 86_400_000)`, flooring for pre-epoch times too.
pub fn day_bucket(unix_ms: i64) -> DayBucket {
    unix_ms.div_euclid(MILLIS_PER_DAY)
}

/// Midnight UTC that opens `day`.
pub fn day_start(day: DayBucket) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(day.checked_mul(MILLIS_PER_DAY)?)
}

/// The seam through which the core observes "now".
pub trait WallClock: Send {
    fn now_unix_ms(&self) -> i64;

    fn today(&self) -> DayBucket {
        day_bucket(self.now_unix_ms())
    }
}

/// Reads the real UTC time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_unix_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at one instant. Used by tests and by `--day` replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    unix_ms: i64,
}

impl FixedClock {
    pub fn at_unix_ms(unix_ms: i64) -> Self {
        Self { unix_ms }
    }

    /// Noon of `day`, well away from either boundary.
    pub fn on_day(day: DayBucket) -> Self {
        Self {
            unix_ms: day.saturating_mul(MILLIS_PER_DAY).saturating_add(MILLIS_PER_DAY / 2),
        }
    }

    pub fn on_date(date: NaiveDate) -> Self {
        let unix_ms = date
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0);
        Self { unix_ms }
    }
}

impl WallClock for FixedClock {
    fn now_unix_ms(&self) -> i64 {
        self.unix_ms
    }
}
