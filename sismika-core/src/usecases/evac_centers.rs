use super::{authorize::authorize_min_permission, prelude::*};

#[derive(Debug, Clone, Default)]
pub struct NewEvacCenter {
    pub name: String,
    pub lng: f64,
    pub lat: f64,
}

pub fn store_evac_center<R: EvacCenterRepo>(
    repo: &R,
    auth: &User,
    new: NewEvacCenter,
) -> Result<EvacCenter> {
    authorize_min_permission(auth, Permission::Researcher)?;
    let pos = MapPoint::try_from_lng_lat_deg(new.lng, new.lat).ok_or(Error::InvalidPosition)?;
    let center = EvacCenter {
        id: Id::new(),
        name: new.name,
        pos,
    };
    repo.create_evac_center(&center)?;
    log::info!("Added evacuation center {} ({})", center.id, center.name);
    Ok(center)
}

pub fn get_evac_center<R: EvacCenterRepo>(repo: &R, id: &str) -> Result<EvacCenter> {
    Ok(repo.get_evac_center(id)?)
}

pub fn all_evac_centers<R: EvacCenterRepo>(repo: &R) -> Result<Vec<EvacCenter>> {
    Ok(repo.all_evac_centers()?)
}

pub fn delete_evac_center<R: EvacCenterRepo>(repo: &R, auth: &User, id: &str) -> Result<()> {
    authorize_min_permission(auth, Permission::Admin)?;
    repo.delete_evac_center(id)?;
    log::info!("Removed evacuation center {id}");
    Ok(())
}
