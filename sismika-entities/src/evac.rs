use crate::{geo::MapPoint, id::Id};

/// Designated evacuation center.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct EvacCenter {
    pub id   : Id,
    pub name : String,
    pub pos  : MapPoint,
}
