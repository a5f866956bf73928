use super::prelude::*;

pub fn get_location<R: LocationRepo>(repo: &R, psgc: &str) -> Result<Location> {
    let psgc = psgc.parse::<PsgcCode>()?;
    Ok(repo.get_location(&psgc)?)
}

pub fn list_locations<R: LocationRepo>(
    repo: &R,
    level: GeographicLevel,
    pagination: &Pagination,
) -> Result<LocationPage> {
    let pagination = Pagination {
        offset: pagination.offset,
        limit: super::effective_limit(pagination.limit, super::DEFAULT_PAGE_SIZE),
    };
    Ok(repo.locations_at_level(level, &pagination)?)
}

/// Looks up the closest other gazetteer entries around a location.
///
/// The location itself is always its own nearest neighbor, so one extra
/// candidate is fetched and filtered back out.
pub fn collate_nearby_locations<R: LocationRepo>(
    repo: &R,
    psgc: &str,
    limit: u64,
) -> Result<Vec<Location>> {
    let origin = get_location(repo, psgc)?;
    let Some(pos) = origin.pos else {
        return Err(Error::InvalidPosition);
    };
    let mut nearby = repo.locations_near(pos, limit.saturating_add(1))?;
    nearby.retain(|l| l.psgc != origin.psgc);
    nearby.truncate(limit as usize);
    Ok(nearby)
}

/// Gazetteer entries that fall inside a location's bounding quad, for
/// rendering the map view of that location's page.
///
/// Entries without recorded bounds cover no map area, so the result
/// comes back empty instead of unbounded.
pub fn locations_within_bounds<R: LocationRepo>(repo: &R, psgc: &str) -> Result<Vec<Location>> {
    let origin = get_location(repo, psgc)?;
    let Some(bounds) = origin.bounds else {
        return Ok(vec![]);
    };
    let mut contained = repo.locations_within_bounds(&bounds)?;
    contained.retain(|l| l.psgc != origin.psgc);
    Ok(contained)
}
