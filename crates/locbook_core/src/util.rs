//! Id generation, clocks and time helpers shared by storage and services.

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub const HOUR_MS: i64 = 60 * 60 * 1000;
pub const DAY_MS: i64 = 24 * HOUR_MS;
pub const WEEK_MS: i64 = 7 * DAY_MS;

/// Generates a fresh opaque document id.
pub fn make_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Returns a timestamp between one week and one hour before `now_ms`.
///
/// Only used to give demo records a plausible history.
pub fn random_past_time(now_ms: i64) -> i64 {
    now_ms - rand::thread_rng().gen_range(HOUR_MS..=WEEK_MS)
}

/// Source of "now" in Unix epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
            })
    }
}
