use crate::repositories::*;

/// Everything a full store backend provides.
pub trait Db:
    EarthquakeRepo + LocationRepo + StationRepo + EvacCenterRepo + UserRepo + SessionRepo
{
}

impl<T> Db for T where
    T: EarthquakeRepo + LocationRepo + StationRepo + EvacCenterRepo + UserRepo + SessionRepo
{
}
