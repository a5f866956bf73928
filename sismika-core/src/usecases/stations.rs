use super::{authorize::authorize_min_permission, prelude::*};

pub fn store_station<R: StationRepo>(repo: &R, auth: &User, station: SeismicStation) -> Result<()> {
    authorize_min_permission(auth, Permission::Researcher)?;
    if station.code.trim().is_empty() {
        return Err(Error::StationCode);
    }
    repo.create_station(&station)?;
    log::info!("Added station {} ({})", station.code, station.name);
    Ok(())
}

pub fn get_station<R: StationRepo>(repo: &R, code: &str) -> Result<SeismicStation> {
    Ok(repo.get_station(code)?)
}

pub fn all_stations<R: StationRepo>(repo: &R) -> Result<Vec<SeismicStation>> {
    Ok(repo.all_stations()?)
}

pub fn delete_station<R: StationRepo>(repo: &R, auth: &User, code: &str) -> Result<()> {
    authorize_min_permission(auth, Permission::Admin)?;
    repo.delete_station(code)?;
    log::info!("Removed station {code}");
    Ok(())
}
