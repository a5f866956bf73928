mod authorize;
mod backfill_titles;
mod collate_affected_areas;
mod earthquakes;
mod error;
mod evac_centers;
mod import;
mod locations;
mod query_earthquakes;
mod resolve_title;
mod sessions;
mod stations;
mod store_earthquake;
mod users;


pub use self::{
    authorize::*, backfill_titles::*, collate_affected_areas::*, earthquakes::*, error::Error,
    evac_centers::*, import::*, locations::*, query_earthquakes::*, resolve_title::*, sessions::*,
    stations::*, store_earthquake::*, users::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}

/// Page size applied when a listing is requested without an explicit
/// limit.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A limit of zero lifts the cap instead of returning nothing.
fn effective_limit(limit: Option<u64>, default_limit: u64) -> Option<u64> {
    match limit {
        None => Some(default_limit),
        Some(0) => None,
        Some(limit) => Some(limit),
    }
}
