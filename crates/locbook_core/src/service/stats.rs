//! Aggregate counts over the location collection.
//!
//! # Invariants
//! - Every location lands in exactly one bucket, so buckets sum to `total`.

use crate::model::location::{Location, RateTier};
use crate::util::{DAY_MS, HOUR_MS, WEEK_MS};
use serde::Serialize;

/// Location counts per rating band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RateBuckets {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl RateBuckets {
    pub fn from_locations(locations: &[Location]) -> Self {
        let mut buckets = locations
            .iter()
            .fold(Self::default(), |mut buckets, location| {
                match location.rate_tier() {
                    RateTier::High => buckets.high += 1,
                    RateTier::Medium => buckets.medium += 1,
                    RateTier::Low => buckets.low += 1,
                }
                buckets
            });
        buckets.total = locations.len();
        buckets
    }
}

/// How long ago a location was last saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAge {
    ThisHour,
    PastDay,
    PastWeek,
    /// A week or more.
    Never,
}

impl UpdateAge {
    /// Classifies elapsed milliseconds. Negative values (clock skew) count
    /// as `ThisHour`.
    pub fn classify(elapsed_ms: i64) -> Self {
        if elapsed_ms < HOUR_MS {
            Self::ThisHour
        } else if elapsed_ms < DAY_MS {
            Self::PastDay
        } else if elapsed_ms < WEEK_MS {
            Self::PastWeek
        } else {
            Self::Never
        }
    }
}

/// Location counts per update-recency band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeBuckets {
    pub this_hour: usize,
    pub past_day: usize,
    pub past_week: usize,
    pub never: usize,
    pub total: usize,
}

impl UpdateTimeBuckets {
    pub fn from_locations(locations: &[Location], now_ms: i64) -> Self {
        let mut buckets = Self {
            total: locations.len(),
            ..Self::default()
        };
        for location in locations {
            let elapsed = now_ms.saturating_sub(location.updated_at);
            match UpdateAge::classify(elapsed) {
                UpdateAge::ThisHour => buckets.this_hour += 1,
                UpdateAge::PastDay => buckets.past_day += 1,
                UpdateAge::PastWeek => buckets.past_week += 1,
                UpdateAge::Never => buckets.never += 1,
            }
        }
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::{RateBuckets, UpdateAge, UpdateTimeBuckets};
    use crate::model::location::{GeoPoint, Location};
    use crate::util::{DAY_MS, HOUR_MS, WEEK_MS};

    fn rated(rate: i32, updated_at: i64) -> Location {
        let mut location = Location::new("x", rate, GeoPoint::new("x", 0.0, 0.0, 1));
        location.updated_at = updated_at;
        location
    }

    #[test]
    fn classify_edges() {
        assert_eq!(UpdateAge::classify(-5), UpdateAge::ThisHour);
        assert_eq!(UpdateAge::classify(HOUR_MS - 1), UpdateAge::ThisHour);
        assert_eq!(UpdateAge::classify(HOUR_MS), UpdateAge::PastDay);
        assert_eq!(UpdateAge::classify(DAY_MS), UpdateAge::PastWeek);
        assert_eq!(UpdateAge::classify(WEEK_MS - 1), UpdateAge::PastWeek);
        assert_eq!(UpdateAge::classify(WEEK_MS), UpdateAge::Never);
    }

    #[test]
    fn rate_buckets_sum_to_total() {
        let locations: Vec<Location> = [1, 2, 3, 3, 4, 5, 5, 7, -1]
            .into_iter()
            .map(|rate| rated(rate, 0))
            .collect();
        let buckets = RateBuckets::from_locations(&locations);
        assert_eq!(buckets.high, 3);
        assert_eq!(buckets.medium, 3);
        assert_eq!(buckets.low, 3);
        assert_eq!(buckets.high + buckets.medium + buckets.low, buckets.total);
        assert_eq!(buckets.total, locations.len());
    }

    #[test]
    fn empty_collection_has_zero_buckets() {
        assert_eq!(RateBuckets::from_locations(&[]), RateBuckets::default());
        assert_eq!(
            UpdateTimeBuckets::from_locations(&[], 0),
            UpdateTimeBuckets::default()
        );
    }

    #[test]
    fn update_time_buckets_serialize_camel_case() {
        let now = 10 * WEEK_MS;
        let buckets = UpdateTimeBuckets::from_locations(&[rated(3, now - 30 * 60 * 1000)], now);
        let json = serde_json::to_value(buckets).unwrap();
        assert_eq!(json["thisHour"], 1);
        assert_eq!(json["pastDay"], 0);
        assert_eq!(json["total"], 1);
    }
}
