//! Location record.
//!
//! # Invariants
//! - `id` is assigned by the document repository on first insert.
//! - `created_at` never changes after creation.
//! - `updated_at` is refreshed by every save.

use crate::repo::document_repo::Document;
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by storage.
pub type LocationId = String;

/// Geographic placement of a location. Opaque to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

impl GeoPoint {
    pub fn new(address: impl Into<String>, lat: f64, lng: f64, zoom: u8) -> Self {
        Self {
            address: address.into(),
            lat,
            lng,
            zoom,
        }
    }
}

/// Rating band used by catalog statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    /// Rated above 4.
    High,
    /// Rated 3 or 4.
    Medium,
    /// Rated below 3.
    Low,
}

impl RateTier {
    pub fn of(rate: i32) -> Self {
        if rate > 4 {
            Self::High
        } else if rate >= 3 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A named, rated place.
///
/// Serialized with camelCase keys (`createdAt`, `updatedAt`) so stored
/// bodies keep the shape front-end callers already read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LocationId>,
    pub name: String,
    /// Semantically 1..=5, not validated.
    pub rate: i32,
    pub geo: GeoPoint,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub updated_at: i64,
}

impl Location {
    /// Creates an unsaved location. Timestamps are filled in by `save`.
    pub fn new(name: impl Into<String>, rate: i32, geo: GeoPoint) -> Self {
        Self {
            id: None,
            name: name.into(),
            rate,
            geo,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Returns the id when this record has been persisted.
    ///
    /// An empty string is treated the same as a missing id.
    pub fn persisted_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn rate_tier(&self) -> RateTier {
        RateTier::of(self.rate)
    }
}

impl Document for Location {
    fn document_id(&self) -> Option<&str> {
        self.persisted_id()
    }

    fn assign_document_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, Location, RateTier};

    #[test]
    fn rate_tier_boundaries() {
        assert_eq!(RateTier::of(5), RateTier::High);
        assert_eq!(RateTier::of(4), RateTier::Medium);
        assert_eq!(RateTier::of(3), RateTier::Medium);
        assert_eq!(RateTier::of(2), RateTier::Low);
        assert_eq!(RateTier::of(0), RateTier::Low);
    }

    #[test]
    fn empty_id_is_not_persisted() {
        let mut location = Location::new("Nowhere", 1, GeoPoint::new("", 0.0, 0.0, 1));
        assert_eq!(location.persisted_id(), None);

        location.id = Some(String::new());
        assert_eq!(location.persisted_id(), None);

        location.id = Some("abc".to_string());
        assert_eq!(location.persisted_id(), Some("abc"));
    }
}
