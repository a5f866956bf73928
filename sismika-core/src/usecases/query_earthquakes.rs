use crate::{
    query::{build_earthquake_query, EarthquakeFilters, EarthquakeQuery},
    usecases::prelude::*,
};

/// Runs a filtered catalog query.
///
/// `pagination.limit` wins over the limit carried inside the filters;
/// a limit of zero on either means no cap at all.
pub fn query_earthquakes<R>(
    repo: &R,
    filters: &EarthquakeFilters,
    pagination: &Pagination,
) -> Result<EarthquakePage>
where
    R: EarthquakeRepo,
{
    let (predicate, sort) = build_earthquake_query(filters);
    let query = EarthquakeQuery {
        predicate,
        sort,
        pagination: Pagination {
            offset: pagination.offset,
            limit: pagination
                .limit
                .or(filters.limit)
                .filter(|limit| *limit > 0),
        },
    };
    log::debug!("Querying earthquake catalog: {}", query.as_document());
    Ok(repo.query_earthquakes(&query)?)
}

/// Catalog slice restricted to one gazetteer entry's bounding quad.
///
/// Entries without recorded bounds cannot match anything, so the page
/// comes back empty instead of unbounded.
pub fn earthquakes_within_location<R>(
    repo: &R,
    psgc: &str,
    pagination: &Pagination,
) -> Result<EarthquakePage>
where
    R: EarthquakeRepo + LocationRepo,
{
    let location = super::get_location(repo, psgc)?;
    let Some(bounds) = location.bounds else {
        return Ok(EarthquakePage::default());
    };
    let filters = EarthquakeFilters {
        bounds: Some(bounds),
        ..Default::default()
    };
    query_earthquakes(repo, &filters, pagination)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use sismika_entities::builders::*;

    fn seeded_catalog() -> MockDb {
        let db = MockDb::default();
        let mut earthquakes = db.earthquakes.borrow_mut();
        earthquakes.push(
            EarthquakeEvent::build()
                .id("shallow-east")
                .epicenter(124.0, 11.0)
                .depth_km(2.0)
                .mw(4.1)
                .occurred_at(Timestamp::from_secs(3_000))
                .finish(),
        );
        earthquakes.push(
            EarthquakeEvent::build()
                .id("mid-luzon")
                .epicenter(121.0, 14.0)
                .depth_km(33.0)
                .mw(5.6)
                .occurred_at(Timestamp::from_secs(1_000))
                .finish(),
        );
        earthquakes.push(
            EarthquakeEvent::build()
                .id("deep-mindanao")
                .epicenter(126.0, 6.0)
                .depth_km(540.0)
                .mw(6.8)
                .occurred_at(Timestamp::from_secs(2_000))
                .finish(),
        );
        drop(earthquakes);
        db
    }

    fn ids(page: &EarthquakePage) -> Vec<&str> {
        page.events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn unfiltered_query_returns_the_whole_catalog() {
        let db = seeded_catalog();
        let page =
            query_earthquakes(&db, &EarthquakeFilters::default(), &Pagination::default()).unwrap();
        assert_eq!(3, page.total_count);
        assert_eq!(3, page.events.len());
    }

    #[test]
    fn depth_range_is_inclusive_and_composes_with_intensity() {
        let db = seeded_catalog();
        let filters = EarthquakeFilters {
            min_depth_km: Some(33.0),
            min_intensity: Some(5.6),
            ..Default::default()
        };
        let page = query_earthquakes(&db, &filters, &Pagination::default()).unwrap();
        assert_eq!(2, page.total_count);
    }

    #[test]
    fn total_count_covers_matches_beyond_the_page() {
        let db = seeded_catalog();
        let filters = EarthquakeFilters {
            order_by_time: true,
            ..Default::default()
        };
        let page = query_earthquakes(
            &db,
            &filters,
            &Pagination {
                offset: Some(1),
                limit: Some(1),
            },
        )
        .unwrap();
        assert_eq!(3, page.total_count);
        assert_eq!(vec!["deep-mindanao"], ids(&page));
    }

    #[test]
    fn zero_limit_lifts_the_cap() {
        let db = seeded_catalog();
        let page = query_earthquakes(
            &db,
            &EarthquakeFilters::default(),
            &Pagination {
                offset: None,
                limit: Some(0),
            },
        )
        .unwrap();
        assert_eq!(3, page.events.len());
    }

    #[test]
    fn sort_priority_is_depth_then_intensity_then_time() {
        let db = seeded_catalog();
        let filters = EarthquakeFilters {
            order_by_time: true,
            order_by_depth: true,
            ..Default::default()
        };
        let page = query_earthquakes(&db, &filters, &Pagination::default()).unwrap();
        assert_eq!(vec!["shallow-east", "mid-luzon", "deep-mindanao"], ids(&page));
    }

    #[test]
    fn bounded_location_restricts_the_catalog() {
        let db = seeded_catalog();
        db.locations.borrow_mut().push(
            Location::build()
                .psgc("0434917000")
                .bounds(GeoBounds::from_rect(
                    MapPoint::from_lng_lat_deg(120.0, 13.0),
                    MapPoint::from_lng_lat_deg(122.0, 15.0),
                ))
                .finish(),
        );
        let page =
            earthquakes_within_location(&db, "0434917000", &Pagination::default()).unwrap();
        assert_eq!(vec!["mid-luzon"], ids(&page));
    }

    #[test]
    fn location_without_bounds_matches_nothing() {
        let db = seeded_catalog();
        db.locations.borrow_mut().push(
            Location::build().psgc("0434917000").finish(),
        );
        let page =
            earthquakes_within_location(&db, "0434917000", &Pagination::default()).unwrap();
        assert_eq!(0, page.total_count);
        assert!(page.events.is_empty());
    }
}
