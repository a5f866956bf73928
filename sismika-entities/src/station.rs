use crate::geo::MapPoint;

/// Seismometer station of the national monitoring network, keyed by its
/// station code (e.g. "MMA" for Manila).
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicStation {
    pub code : String,
    pub name : String,
    pub kind : String,
    pub pos  : MapPoint,
}
