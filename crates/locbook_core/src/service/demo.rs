//! Demo records written on first start.

use crate::model::location::{GeoPoint, Location};

/// Unsaved demo locations, rated 2, 4 and 5.
pub fn demo_locations() -> Vec<Location> {
    vec![
        Location::new(
            "Ben Gurion Airport",
            2,
            GeoPoint::new("Ben Gurion Airport, 7015001, Israel", 32.0004465, 34.8706095, 12),
        ),
        Location::new(
            "Dekel Beach",
            4,
            GeoPoint::new(
                "Derekh Mitsrayim 1, Eilat, 88000, Israel",
                29.5393848,
                34.9457792,
                15,
            ),
        ),
        Location::new(
            "Dahab, Egypt",
            5,
            GeoPoint::new("Dahab, South Sinai, Egypt", 28.5096676, 34.5165187, 11),
        ),
    ]
}
