use crate::{geo::MapPoint, id::Id, time::Timestamp};

/// A single recorded earthquake.
///
/// `title` is the cached human-readable headline resolved against the
/// place gazetteer at ingestion time.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeEvent {
    pub id              : Id,
    pub title           : String,
    pub occurred_at     : Timestamp,
    pub epicenter       : MapPoint,
    pub depth_km        : f64,
    pub magnitudes      : Magnitudes,
    pub local_intensity : String,
}

/// Magnitude readings across the scales the network reports.
///
/// The unified moment magnitude `mw` is always present; the other scales
/// are kept as reported, when reported at all.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnitudes {
    pub ml : Option<f64>,
    pub mb : Option<f64>,
    pub ms : Option<f64>,
    pub mw : f64,
}
