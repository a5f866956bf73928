#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamps in seconds.

use anyhow::anyhow;
use sismika_core::entities::*;

use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = earthquakes)]
pub struct NewEarthquake<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub occurred_at: i64,
    pub lng: f64,
    pub lat: f64,
    pub depth_km: f64,
    pub ml: Option<f64>,
    pub mb: Option<f64>,
    pub ms: Option<f64>,
    pub mw: f64,
    pub local_intensity: &'a str,
}

impl<'a> From<&'a EarthquakeEvent> for NewEarthquake<'a> {
    fn from(from: &'a EarthquakeEvent) -> Self {
        Self {
            id: from.id.as_str(),
            title: &from.title,
            occurred_at: from.occurred_at.as_secs(),
            lng: from.epicenter.lng(),
            lat: from.epicenter.lat(),
            depth_km: from.depth_km,
            ml: from.magnitudes.ml,
            mb: from.magnitudes.mb,
            ms: from.magnitudes.ms,
            mw: from.magnitudes.mw,
            local_intensity: &from.local_intensity,
        }
    }
}

#[derive(Queryable)]
pub struct EarthquakeEntity {
    pub id: String,
    pub title: String,
    pub occurred_at: i64,
    pub lng: f64,
    pub lat: f64,
    pub depth_km: f64,
    pub ml: Option<f64>,
    pub mb: Option<f64>,
    pub ms: Option<f64>,
    pub mw: f64,
    pub local_intensity: String,
}

impl From<EarthquakeEntity> for EarthquakeEvent {
    fn from(from: EarthquakeEntity) -> Self {
        let EarthquakeEntity {
            id,
            title,
            occurred_at,
            lng,
            lat,
            depth_km,
            ml,
            mb,
            ms,
            mw,
            local_intensity,
        } = from;
        Self {
            id: id.into(),
            title,
            occurred_at: Timestamp::from_secs(occurred_at),
            // Coordinates have been validated on insert.
            epicenter: MapPoint::try_from_lng_lat_deg(lng, lat).unwrap_or_default(),
            depth_km,
            magnitudes: Magnitudes { ml, mb, ms, mw },
            local_intensity,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = locations)]
pub struct NewLocation<'a> {
    pub psgc: &'a str,
    pub name: &'a str,
    pub long_name: &'a str,
    pub level: i16,
    pub population: i64,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    pub bounds: Option<String>,
}

impl<'a> From<&'a Location> for NewLocation<'a> {
    fn from(from: &'a Location) -> Self {
        Self {
            psgc: from.psgc.as_str(),
            name: &from.name,
            long_name: &from.long_name,
            level: from.level as i16,
            population: from.population as i64,
            lng: from.pos.map(MapPoint::lng),
            lat: from.pos.map(MapPoint::lat),
            bounds: from.bounds.as_ref().map(bounds_to_string),
        }
    }
}

#[derive(Queryable)]
pub struct LocationEntity {
    pub psgc: String,
    pub name: String,
    pub long_name: String,
    pub level: i16,
    pub population: i64,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    pub bounds: Option<String>,
}

/// Encodes the quad as four `lng,lat` corners separated by spaces.
///
/// The plain `Display` representation of `f64` round-trips exactly.
pub fn bounds_to_string(bounds: &GeoBounds) -> String {
    let [a, b, c, d] = bounds.corners();
    format!("{a} {b} {c} {d}")
}

pub fn parse_bounds(encoded: &str) -> anyhow::Result<GeoBounds> {
    let corners = encoded
        .split(' ')
        .map(parse_map_point)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let corners: [MapPoint; 4] = corners
        .try_into()
        .map_err(|_| anyhow!("Expected four corners: {encoded}"))?;
    Ok(GeoBounds::new(corners))
}

fn parse_map_point(encoded: &str) -> anyhow::Result<MapPoint> {
    let (lng, lat) = encoded
        .split_once(',')
        .ok_or_else(|| anyhow!("Malformed coordinate pair: {encoded}"))?;
    MapPoint::try_from_lng_lat_deg(lng.parse()?, lat.parse()?)
        .ok_or_else(|| anyhow!("Coordinates out of range: {encoded}"))
}

#[derive(Insertable)]
#[diesel(table_name = stations)]
pub struct NewStation<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub kind: &'a str,
    pub lng: f64,
    pub lat: f64,
}

impl<'a> From<&'a SeismicStation> for NewStation<'a> {
    fn from(from: &'a SeismicStation) -> Self {
        Self {
            code: &from.code,
            name: &from.name,
            kind: &from.kind,
            lng: from.pos.lng(),
            lat: from.pos.lat(),
        }
    }
}

#[derive(Queryable)]
pub struct StationEntity {
    pub code: String,
    pub name: String,
    pub kind: String,
    pub lng: f64,
    pub lat: f64,
}

impl From<StationEntity> for SeismicStation {
    fn from(from: StationEntity) -> Self {
        let StationEntity {
            code,
            name,
            kind,
            lng,
            lat,
        } = from;
        Self {
            code,
            name,
            kind,
            pos: MapPoint::try_from_lng_lat_deg(lng, lat).unwrap_or_default(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = evac_centers)]
pub struct NewEvacCenter<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub lng: f64,
    pub lat: f64,
}

impl<'a> From<&'a EvacCenter> for NewEvacCenter<'a> {
    fn from(from: &'a EvacCenter) -> Self {
        Self {
            id: from.id.as_str(),
            name: &from.name,
            lng: from.pos.lng(),
            lat: from.pos.lat(),
        }
    }
}

#[derive(Queryable)]
pub struct EvacCenterEntity {
    pub id: String,
    pub name: String,
    pub lng: f64,
    pub lat: f64,
}

impl From<EvacCenterEntity> for EvacCenter {
    fn from(from: EvacCenterEntity) -> Self {
        let EvacCenterEntity { id, name, lng, lat } = from;
        Self {
            id: id.into(),
            name,
            pos: MapPoint::try_from_lng_lat_deg(lng, lat).unwrap_or_default(),
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub subject: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub picture: &'a str,
    pub permission: i16,
}

impl<'a> From<&'a User> for NewUser<'a> {
    fn from(from: &'a User) -> Self {
        Self {
            subject: from.subject.as_str(),
            name: &from.name,
            email: &from.email,
            picture: &from.picture,
            permission: from.permission as i16,
        }
    }
}

#[derive(Queryable)]
pub struct UserEntity {
    pub subject: String,
    pub name: String,
    pub email: String,
    pub picture: String,
    pub permission: i16,
}

#[derive(Insertable)]
#[diesel(table_name = pending_sessions)]
pub struct NewPendingSession<'a> {
    pub id: &'a str,
    pub nonce: String,
    pub expires_at: i64,
}

impl<'a> From<&'a PendingSession> for NewPendingSession<'a> {
    fn from(from: &'a PendingSession) -> Self {
        Self {
            id: from.id.as_str(),
            nonce: from.nonce.to_string(),
            expires_at: from.expires_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct PendingSessionEntity {
    pub id: String,
    pub nonce: String,
    pub expires_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = sessions)]
pub struct NewSession<'a> {
    pub id: &'a str,
    pub user_subject: &'a str,
    pub expires_at: i64,
}

impl<'a> From<&'a Session> for NewSession<'a> {
    fn from(from: &'a Session) -> Self {
        Self {
            id: from.id.as_str(),
            user_subject: from.user.as_str(),
            expires_at: from.expires_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct SessionEntity {
    pub id: String,
    pub user_subject: String,
    pub expires_at: i64,
}

impl From<SessionEntity> for Session {
    fn from(from: SessionEntity) -> Self {
        let SessionEntity {
            id,
            user_subject,
            expires_at,
        } = from;
        Self {
            id: id.into(),
            user: user_subject.into(),
            expires_at: Timestamp::from_secs(expires_at),
        }
    }
}
