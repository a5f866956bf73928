use super::prelude::*;
use crate::seismo;

/// Gazetteer entries inside the estimated impact radius of one event.
///
/// `total_population` only sums entries of the finest administrative
/// level present in the match set. Coarser entries contain the finer
/// ones, so adding them in would count the same people twice.
#[derive(Debug, Clone)]
pub struct AffectedAreas {
    pub locations: Vec<Location>,
    pub total_count: u64,
    pub total_population: u64,
    pub radius_meters: u64,
}

pub fn collate_affected_areas<R>(
    repo: &R,
    event_id: &str,
    pagination: &Pagination,
) -> Result<AffectedAreas>
where
    R: EarthquakeRepo + LocationRepo,
{
    let event = repo.get_earthquake(event_id)?;
    let radius_meters = seismo::estimate_radius_meters(event.magnitudes.mw, event.depth_km);
    let cap = SphericalCap::from_center_and_radius_meters(event.epicenter, radius_meters as f64);

    let mut matches = repo.locations_within_cap(&cap)?;
    matches.sort_by(|a, b| {
        let da = a.pos.map_or(f64::INFINITY, |p| event.epicenter.central_angle_rad(p));
        let db = b.pos.map_or(f64::INFINITY, |p| event.epicenter.central_angle_rad(p));
        da.total_cmp(&db).then_with(|| a.psgc.cmp(&b.psgc))
    });

    let total_count = matches.len() as u64;
    let finest_level = matches.iter().map(|l| l.level).max();
    let total_population = matches
        .iter()
        .filter(|l| Some(l.level) == finest_level)
        .map(|l| l.population)
        .sum();

    let offset = pagination.offset.unwrap_or(0) as usize;
    let limit = super::effective_limit(pagination.limit, super::DEFAULT_PAGE_SIZE);
    let locations = matches
        .into_iter()
        .skip(offset)
        .take(limit.map_or(usize::MAX, |l| l as usize))
        .collect();

    Ok(AffectedAreas {
        locations,
        total_count,
        total_population,
        radius_meters,
    })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use crate::repositories::Error as RepoError;
    use sismika_entities::builders::*;

    // Mw 6.0 at 10 km depth estimates a 17,433 m impact radius.
    fn sample_event(db: &MockDb) -> String {
        let event = EarthquakeEvent::build()
            .id("q1")
            .epicenter(121.0, 14.0)
            .depth_km(10.0)
            .mw(6.0)
            .finish();
        db.earthquakes.borrow_mut().push(event);
        "q1".into()
    }

    #[test]
    fn collation_keeps_every_match_in_the_count() {
        let db = MockDb::default();
        let id = sample_event(&db);
        let mut locations = db.locations.borrow_mut();
        locations.push(
            Location::build()
                .psgc("0434917000")
                .level(GeographicLevel::Municipality)
                .pos(121.05, 14.0)
                .finish(),
        );
        locations.push(
            Location::build()
                .psgc("0434917001")
                .level(GeographicLevel::Barangay)
                .pos(121.1, 14.1)
                .finish(),
        );
        locations.push(
            Location::build()
                .psgc("0434918000")
                .level(GeographicLevel::Municipality)
                .pos(121.2, 14.0)
                .finish(),
        );
        drop(locations);

        let areas = collate_affected_areas(&db, &id, &Pagination::default()).unwrap();
        assert_eq!(17_433, areas.radius_meters);
        // The third entry sits ~21.6 km out, beyond the estimated radius.
        assert_eq!(2, areas.total_count);
        assert_eq!(2, areas.locations.len());
    }

    #[test]
    fn population_sums_only_the_finest_level_present() {
        let db = MockDb::default();
        let id = sample_event(&db);
        let mut locations = db.locations.borrow_mut();
        locations.push(
            Location::build()
                .psgc("0434917000")
                .level(GeographicLevel::City)
                .population(100_000)
                .pos(121.05, 14.0)
                .finish(),
        );
        locations.push(
            Location::build()
                .psgc("0434917001")
                .level(GeographicLevel::Barangay)
                .population(5_000)
                .pos(121.02, 14.02)
                .finish(),
        );
        locations.push(
            Location::build()
                .psgc("0434917002")
                .level(GeographicLevel::Barangay)
                .population(7_000)
                .pos(121.0, 14.05)
                .finish(),
        );
        drop(locations);

        let areas = collate_affected_areas(&db, &id, &Pagination::default()).unwrap();
        assert_eq!(3, areas.total_count);
        assert_eq!(12_000, areas.total_population);
    }

    #[test]
    fn without_barangays_the_coarser_levels_carry_the_population() {
        let db = MockDb::default();
        let id = sample_event(&db);
        let mut locations = db.locations.borrow_mut();
        locations.push(
            Location::build()
                .psgc("0434917000")
                .level(GeographicLevel::Province)
                .population(1_000_000)
                .pos(121.05, 14.0)
                .finish(),
        );
        locations.push(
            Location::build()
                .psgc("0434918000")
                .level(GeographicLevel::Municipality)
                .population(60_000)
                .pos(121.02, 14.02)
                .finish(),
        );
        drop(locations);

        let areas = collate_affected_areas(&db, &id, &Pagination::default()).unwrap();
        assert_eq!(60_000, areas.total_population);
    }

    #[test]
    fn page_slice_respects_offset_and_distance_order() {
        let db = MockDb::default();
        let id = sample_event(&db);
        let mut locations = db.locations.borrow_mut();
        locations.push(
            Location::build()
                .psgc("0434917001")
                .name("second")
                .pos(121.1, 14.0)
                .finish(),
        );
        locations.push(
            Location::build()
                .psgc("0434917000")
                .name("first")
                .pos(121.05, 14.0)
                .finish(),
        );
        drop(locations);

        let page = Pagination {
            offset: Some(1),
            limit: Some(1),
        };
        let areas = collate_affected_areas(&db, &id, &page).unwrap();
        assert_eq!(2, areas.total_count);
        assert_eq!(1, areas.locations.len());
        assert_eq!("second", areas.locations[0].name);
    }

    #[test]
    fn unknown_event_is_reported_as_missing() {
        let db = MockDb::default();
        assert!(matches!(
            collate_affected_areas(&db, "nope", &Pagination::default()),
            Err(Error::Repo(RepoError::NotFound))
        ));
    }
}
