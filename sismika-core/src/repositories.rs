// Low-level storage access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use std::io;

use thiserror::Error;

use crate::{entities::*, query::EarthquakeQuery};

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested record could not be found")]
    NotFound,
    #[error("The record already exists")]
    AlreadyExists,
    #[error("The data store is unreachable")]
    Connection(#[source] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Slice of the earthquake catalog together with the size of the full
/// match set.
#[derive(Debug, Clone, Default)]
pub struct EarthquakePage {
    pub events: Vec<EarthquakeEvent>,
    pub total_count: u64,
}

/// Slice of the gazetteer together with the size of the full match set.
#[derive(Debug, Clone, Default)]
pub struct LocationPage {
    pub locations: Vec<Location>,
    pub total_count: u64,
}

pub trait EarthquakeRepo {
    fn create_earthquake(&self, event: &EarthquakeEvent) -> Result<()>;

    fn get_earthquake(&self, id: &str) -> Result<EarthquakeEvent>;
    fn all_earthquakes(&self) -> Result<Vec<EarthquakeEvent>>;
    fn count_earthquakes(&self) -> Result<usize>;

    /// Evaluates a catalog query: filter, order, slice.
    ///
    /// `total_count` reflects the match set before pagination.
    fn query_earthquakes(&self, query: &EarthquakeQuery) -> Result<EarthquakePage>;

    // Stored events are immutable except for the cached headline.
    fn update_earthquake_title(&self, id: &str, title: &str) -> Result<()>;

    fn delete_earthquake(&self, id: &str) -> Result<()>;
}

pub trait LocationRepo {
    // The gazetteer is reference data, so imports replace wholesale.
    fn create_or_replace_location(&self, location: &Location) -> Result<()>;

    fn get_location(&self, psgc: &PsgcCode) -> Result<Location>;
    fn count_locations(&self) -> Result<usize>;

    fn locations_at_level(
        &self,
        level: GeographicLevel,
        pagination: &Pagination,
    ) -> Result<LocationPage>;

    /// Up to `limit` positioned gazetteer entries, closest to `point`
    /// first. Entries without coordinates never appear in the result.
    fn locations_near(&self, point: MapPoint, limit: u64) -> Result<Vec<Location>>;

    /// The positioned gazetteer entry closest to `point`.
    fn nearest_location(&self, point: MapPoint) -> Result<Location> {
        self.locations_near(point, 1)?
            .into_iter()
            .next()
            .ok_or(Error::NotFound)
    }

    /// All positioned gazetteer entries inside the spherical cap, in no
    /// particular order.
    fn locations_within_cap(&self, cap: &SphericalCap) -> Result<Vec<Location>>;

    /// All positioned gazetteer entries inside the bounding quad, in no
    /// particular order.
    fn locations_within_bounds(&self, bounds: &GeoBounds) -> Result<Vec<Location>>;
}

pub trait StationRepo {
    fn create_station(&self, station: &SeismicStation) -> Result<()>;
    fn get_station(&self, code: &str) -> Result<SeismicStation>;
    fn all_stations(&self) -> Result<Vec<SeismicStation>>;
    fn count_stations(&self) -> Result<usize>;
    fn delete_station(&self, code: &str) -> Result<()>;
}

pub trait EvacCenterRepo {
    fn create_evac_center(&self, center: &EvacCenter) -> Result<()>;
    fn get_evac_center(&self, id: &str) -> Result<EvacCenter>;
    fn all_evac_centers(&self) -> Result<Vec<EvacCenter>>;
    fn count_evac_centers(&self) -> Result<usize>;
    fn delete_evac_center(&self, id: &str) -> Result<()>;
}

pub trait UserRepo {
    fn create_or_update_user(&self, user: &User) -> Result<()>;
    fn delete_user(&self, subject: &SubjectId) -> Result<()>;

    fn all_users(&self) -> Result<Vec<User>>;
    fn count_users(&self) -> Result<usize>;

    fn get_user(&self, subject: &SubjectId) -> Result<User>;
    fn try_get_user(&self, subject: &SubjectId) -> Result<Option<User>>;
}

pub trait SessionRepo {
    fn create_pending_session(&self, pending: &PendingSession) -> Result<()>;

    /// Removes and returns a pending session. Sessions that have already
    /// been confirmed are not taken.
    fn take_pending_session(&self, id: &str) -> Result<PendingSession>;

    /// Replaces the pending session with the confirmed one under the
    /// same id.
    fn upgrade_session(&self, session: &Session) -> Result<()>;

    fn get_session(&self, id: &str) -> Result<Session>;
    fn delete_session(&self, id: &str) -> Result<()>;

    /// Deletes pending and confirmed sessions that expired strictly
    /// before the given deadline. Returns how many were removed.
    fn delete_expired_sessions(&self, expired_before: Timestamp) -> Result<usize>;
}
