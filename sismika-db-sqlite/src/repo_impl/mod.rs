// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamps in seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use num_traits::FromPrimitive as _;

use sismika_core::{
    entities::*,
    query::{Condition, EarthquakeQuery, SortKey},
    repositories::{self as repo, *},
};

use super::*;

mod earthquake;
mod evac_center;
mod location;
mod session;
mod station;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn load_location(entity: models::LocationEntity) -> Result<Location> {
    let models::LocationEntity {
        psgc,
        name,
        long_name,
        level,
        population,
        lng,
        lat,
        bounds,
    } = entity;
    let level = GeographicLevel::from_i16(level)
        .ok_or_else(|| anyhow!("Invalid geographic level: {level}"))?;
    let psgc = psgc
        .parse()
        .map_err(|_| anyhow!("Invalid PSGC code: {psgc}"))?;
    let pos = match (lng, lat) {
        (Some(lng), Some(lat)) => MapPoint::try_from_lng_lat_deg(lng, lat),
        _ => None,
    };
    let bounds = bounds.as_deref().map(models::parse_bounds).transpose()?;
    Ok(Location {
        psgc,
        name,
        long_name,
        level,
        population: population as u64,
        pos,
        bounds,
    })
}

fn load_user(entity: models::UserEntity) -> Result<User> {
    let models::UserEntity {
        subject,
        name,
        email,
        picture,
        permission,
    } = entity;
    let permission = Permission::from_i16(permission)
        .ok_or_else(|| anyhow!("Invalid permission: {permission}"))?;
    Ok(User {
        subject: subject.into(),
        name,
        email,
        picture,
        permission,
    })
}

fn load_pending_session(entity: models::PendingSessionEntity) -> Result<PendingSession> {
    let models::PendingSessionEntity {
        id,
        nonce,
        expires_at,
    } = entity;
    let nonce = nonce
        .parse::<Nonce>()
        .map_err(|_| anyhow!("Malformed nonce of pending session {id}"))?;
    Ok(PendingSession {
        id: id.into(),
        nonce,
        expires_at: Timestamp::from_secs(expires_at),
    })
}
