use super::{authorize::authorize_min_permission, prelude::*};

pub fn get_earthquake<R: EarthquakeRepo>(repo: &R, id: &str) -> Result<EarthquakeEvent> {
    Ok(repo.get_earthquake(id)?)
}

/// Removes an event from the catalog for good.
///
/// Stored events are otherwise immutable, so only admins may take one
/// out again.
pub fn delete_earthquake<R: EarthquakeRepo>(repo: &R, auth: &User, id: &str) -> Result<()> {
    authorize_min_permission(auth, Permission::Admin)?;
    repo.delete_earthquake(id)?;
    log::info!("Deleted earthquake {id}");
    Ok(())
}
