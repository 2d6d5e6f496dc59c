use locbook_core::db::open_db_in_memory;
use locbook_core::util::{DAY_MS, HOUR_MS};
use locbook_core::{
    Clock, Document, DocumentRepository, GeoPoint, Location, LocationCatalog, RateBuckets,
    RepoError, RepoResult, SqliteDocumentRepository, UpdateTimeBuckets, LOCATIONS_COLLECTION,
};

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Repository whose reads always fail, standing in for a corrupt store.
struct BrokenRepository;

impl DocumentRepository for BrokenRepository {
    fn query<T: Document>(&self, collection: &str) -> RepoResult<Vec<T>> {
        Err(RepoError::InvalidData(format!("{collection} is unreadable")))
    }

    fn get<T: Document>(&self, collection: &str, _id: &str) -> RepoResult<T> {
        Err(RepoError::InvalidData(format!("{collection} is unreadable")))
    }

    fn post<T: Document>(&self, collection: &str, _document: T) -> RepoResult<T> {
        Err(RepoError::InvalidData(format!("{collection} is read-only")))
    }

    fn put<T: Document>(&self, collection: &str, _document: T) -> RepoResult<T> {
        Err(RepoError::InvalidData(format!("{collection} is read-only")))
    }

    fn remove(&self, collection: &str, _id: &str) -> RepoResult<()> {
        Err(RepoError::InvalidData(format!("{collection} is read-only")))
    }

    fn save_all<T: Document>(&self, collection: &str, _documents: &[T]) -> RepoResult<()> {
        Err(RepoError::InvalidData(format!("{collection} is read-only")))
    }
}

const NOW: i64 = 1_706_562_160_181;

fn stored(id: &str, rate: i32, updated_at: i64) -> Location {
    let mut location = Location::new(id, rate, GeoPoint::new(id, 0.0, 0.0, 12));
    location.id = Some(id.to_string());
    location.created_at = updated_at;
    location.updated_at = updated_at;
    location
}

#[test]
fn rate_map_for_demo_distribution() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);
    repo.save_all(
        LOCATIONS_COLLECTION,
        &[stored("a", 2, NOW), stored("b", 4, NOW), stored("c", 5, NOW)],
    )
    .unwrap();
    let catalog = LocationCatalog::with_clock(repo, FixedClock(NOW));

    assert_eq!(
        catalog.loc_count_by_rate().unwrap(),
        RateBuckets {
            high: 1,
            medium: 1,
            low: 1,
            total: 3,
        }
    );
}

#[test]
fn update_time_buckets_follow_elapsed_time() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);
    repo.save_all(
        LOCATIONS_COLLECTION,
        &[
            stored("half-hour", 3, NOW - HOUR_MS / 2),
            stored("ten-hours", 3, NOW - 10 * HOUR_MS),
            stored("three-days", 3, NOW - 3 * DAY_MS),
            stored("thirty-days", 3, NOW - 30 * DAY_MS),
            stored("future", 3, NOW + HOUR_MS),
        ],
    )
    .unwrap();
    let catalog = LocationCatalog::with_clock(repo, FixedClock(NOW));

    let buckets = catalog.loc_count_by_update_time().unwrap();
    assert_eq!(
        buckets,
        UpdateTimeBuckets {
            this_hour: 2,
            past_day: 1,
            past_week: 1,
            never: 1,
            total: 5,
        }
    );
    assert_eq!(
        buckets.this_hour + buckets.past_day + buckets.past_week + buckets.never,
        buckets.total
    );
}

#[test]
fn stats_on_empty_collection_are_zero() {
    let conn = open_db_in_memory().unwrap();
    let catalog = LocationCatalog::with_clock(SqliteDocumentRepository::new(&conn), FixedClock(NOW));

    assert_eq!(catalog.loc_count_by_rate().unwrap(), RateBuckets::default());
    assert_eq!(
        catalog.loc_count_by_update_time().unwrap(),
        UpdateTimeBuckets::default()
    );
}

#[test]
fn storage_failures_propagate_from_every_operation() {
    let catalog = LocationCatalog::with_clock(BrokenRepository, FixedClock(NOW));

    assert!(matches!(
        catalog.loc_count_by_rate(),
        Err(RepoError::InvalidData(_))
    ));
    assert!(matches!(
        catalog.loc_count_by_update_time(),
        Err(RepoError::InvalidData(_))
    ));
    assert!(catalog.query(&Default::default()).is_err());
    assert!(catalog.get_by_id("x").is_err());
    assert!(catalog.remove("x").is_err());
    assert!(catalog.seed_demo_locations().is_err());
}
