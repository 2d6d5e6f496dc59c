//! Core logic for locbook: a small catalog of rated locations stored in a
//! local document store.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod util;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::location::{GeoPoint, Location, LocationId, RateTier};
pub use model::query::{
    FilterPatch, LocationFilter, LocationQuery, LocationSort, PageRequest, SortDirection, SortKey,
    DEFAULT_PAGE_SIZE,
};
pub use repo::document_repo::{
    Document, DocumentRepository, RepoError, RepoResult, SqliteDocumentRepository,
};
pub use service::location_service::{CatalogOptions, LocationCatalog, LOCATIONS_COLLECTION};
pub use service::stats::{RateBuckets, UpdateAge, UpdateTimeBuckets};
pub use util::{Clock, SystemClock};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
