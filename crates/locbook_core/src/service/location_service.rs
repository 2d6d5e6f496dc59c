//! Location catalog use-case service.
//!
//! # Responsibility
//! - Query, save and remove locations in the `locs` collection.
//! - Compute rating and recency statistics.
//! - Seed demo data into an empty collection.
//!
//! # Invariants
//! - Every call round-trips through the repository; nothing is cached.
//! - `save` never rewrites `created_at` on an existing record.
//! - Repository errors reach the caller unchanged.
//!
//! # See also
//! - `model::query` for filter, sort and paging rules.
//! - `service::stats` for bucket boundaries.

use crate::model::location::Location;
use crate::model::query::LocationQuery;
use crate::repo::document_repo::{DocumentRepository, RepoResult};
use crate::service::demo::demo_locations;
use crate::service::stats::{RateBuckets, UpdateTimeBuckets};
use crate::util::{make_id, random_past_time, Clock, SystemClock};
use log::{debug, error, info};

/// Collection that holds every location record.
pub const LOCATIONS_COLLECTION: &str = "locs";

/// Start-up behavior for a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Write the demo locations when the collection is empty.
    pub seed_demo_data: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
        }
    }
}

/// Facade over a document repository for location records.
pub struct LocationCatalog<R: DocumentRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: DocumentRepository> LocationCatalog<R> {
    /// Creates a catalog that reads wall-clock time.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: DocumentRepository, C: Clock> LocationCatalog<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Applies start-up options. Returns the number of demo records written.
    pub fn init(&self, options: &CatalogOptions) -> RepoResult<usize> {
        if !options.seed_demo_data {
            return Ok(0);
        }
        self.seed_demo_locations()
    }

    /// Writes the demo locations if the collection is empty.
    ///
    /// Each demo record gets a fresh id and a backdated timestamp so the
    /// recency statistics have something to show.
    pub fn seed_demo_locations(&self) -> RepoResult<usize> {
        let existing = self.repo.query::<Location>(LOCATIONS_COLLECTION)?;
        if !existing.is_empty() {
            return Ok(0);
        }

        let now = self.clock.now_ms();
        let demo: Vec<Location> = demo_locations()
            .into_iter()
            .map(|mut location| {
                location.id = Some(make_id());
                location.created_at = random_past_time(now);
                location.updated_at = location.created_at;
                location
            })
            .collect();

        self.repo.save_all(LOCATIONS_COLLECTION, &demo)?;
        info!(
            "event=loc_seed module=catalog status=ok count={}",
            demo.len()
        );
        Ok(demo.len())
    }

    /// Returns the locations matching `query`, in its sort order.
    pub fn query(&self, query: &LocationQuery) -> RepoResult<Vec<Location>> {
        let locations = self.repo.query::<Location>(LOCATIONS_COLLECTION)?;
        let fetched = locations.len();
        let result = query.apply(locations);
        debug!(
            "event=loc_query module=catalog status=ok fetched={fetched} returned={} sort={:?}",
            result.len(),
            query.sort.key
        );
        Ok(result)
    }

    /// Gets one location, or `RepoError::NotFound`.
    pub fn get_by_id(&self, id: &str) -> RepoResult<Location> {
        self.repo.get(LOCATIONS_COLLECTION, id)
    }

    /// Removes one location. A missing id is reported as `RepoError::NotFound`.
    pub fn remove(&self, id: &str) -> RepoResult<()> {
        self.repo.remove(LOCATIONS_COLLECTION, id)?;
        info!("event=loc_remove module=catalog status=ok id={id}");
        Ok(())
    }

    /// Creates or updates `location` and returns the stored record.
    ///
    /// # Contract
    /// - With an id: keeps the stored `created_at`, refreshes `updated_at`
    ///   and replaces the stored record. A missing id is `RepoError::NotFound`.
    /// - Without an id: sets both timestamps to now; storage assigns the id.
    pub fn save(&self, mut location: Location) -> RepoResult<Location> {
        let now = self.clock.now_ms();

        if let Some(id) = location.persisted_id() {
            let stored: Location = self.repo.get(LOCATIONS_COLLECTION, id)?;
            location.created_at = stored.created_at;
            location.updated_at = now;
            let saved = self.repo.put(LOCATIONS_COLLECTION, location)?;
            info!(
                "event=loc_save module=catalog status=ok mode=update id={}",
                saved.persisted_id().unwrap_or_default()
            );
            Ok(saved)
        } else {
            location.created_at = now;
            location.updated_at = now;
            let saved = self.repo.post(LOCATIONS_COLLECTION, location)?;
            info!(
                "event=loc_save module=catalog status=ok mode=create id={}",
                saved.persisted_id().unwrap_or_default()
            );
            Ok(saved)
        }
    }

    /// Counts locations by rating band.
    pub fn loc_count_by_rate(&self) -> RepoResult<RateBuckets> {
        let locations = self.load_for_stats("rate")?;
        Ok(RateBuckets::from_locations(&locations))
    }

    /// Counts locations by how recently they were saved.
    pub fn loc_count_by_update_time(&self) -> RepoResult<UpdateTimeBuckets> {
        let locations = self.load_for_stats("update_time")?;
        let buckets = UpdateTimeBuckets::from_locations(&locations, self.clock.now_ms());
        info!(
            "event=loc_stats module=catalog status=ok stat=update_time this_hour={} past_day={} past_week={} never={} total={}",
            buckets.this_hour, buckets.past_day, buckets.past_week, buckets.never, buckets.total
        );
        Ok(buckets)
    }

    fn load_for_stats(&self, stat: &str) -> RepoResult<Vec<Location>> {
        self.repo
            .query::<Location>(LOCATIONS_COLLECTION)
            .map_err(|err| {
                error!("event=loc_stats module=catalog status=error stat={stat} error={err}");
                err
            })
    }
}
