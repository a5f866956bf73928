use super::prelude::*;

/// Formats a distance to two significant figures, the way event titles
/// quote it.
fn format_distance_km(km: f64) -> String {
    if !km.is_finite() || km <= 0.0 {
        return "0".into();
    }
    let exponent = km.log10().floor();
    let factor = 10f64.powf(exponent - 1.0);
    let rounded = (km / factor).round() * factor;
    // Rounding can carry into the next magnitude (9.96 becomes 10).
    let exponent = rounded.log10().floor();
    let decimals = (1.0 - exponent).max(0.0) as usize;
    format!("{rounded:.decimals$}")
}

/// Derives the display title of an event from the gazetteer entry
/// closest to its epicenter.
///
/// The compass label names where the epicenter lies as seen from that
/// place, e.g. `42km West of Mauban, Quezon` for a quake offshore to
/// the west. With an empty gazetteer there is nothing to anchor the
/// title to and the lookup error is passed on.
pub fn resolve_title<R: LocationRepo>(repo: &R, epicenter: MapPoint) -> Result<String> {
    let location = repo.nearest_location(epicenter)?;
    let pos = location.pos.ok_or(Error::InvalidPosition)?;
    let distance_km = epicenter.distance_meters(pos) / 1_000.0;
    let wind = CompassPoint::from_bearing_deg(epicenter.initial_bearing_deg(pos));
    Ok(format!(
        "{}km {} of {}",
        format_distance_km(distance_km),
        wind,
        location.long_name
    ))
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use crate::repositories::Error as RepoError;
    use sismika_entities::builders::*;

    #[test]
    fn distances_carry_two_significant_figures() {
        assert_eq!("0", format_distance_km(0.0));
        assert_eq!("0.87", format_distance_km(0.874));
        assert_eq!("7.4", format_distance_km(7.35));
        assert_eq!("10", format_distance_km(9.96));
        assert_eq!("42", format_distance_km(42.0044));
        assert_eq!("120", format_distance_km(123.4));
    }

    #[test]
    fn title_names_the_nearest_place() {
        let db = MockDb::default();
        db.locations.borrow_mut().push(
            Location::build()
                .psgc("0434917000")
                .long_name("Mauban, Quezon")
                .pos(121.3893, 14.0)
                .finish(),
        );

        let epicenter = MapPoint::from_lng_lat_deg(121.0, 14.0);
        let title = resolve_title(&db, epicenter).unwrap();
        assert_eq!("42km West of Mauban, Quezon", title);
    }

    #[test]
    fn title_picks_the_closest_of_several_places() {
        let db = MockDb::default();
        db.locations.borrow_mut().push(
            Location::build()
                .psgc("0434901000")
                .long_name("Far Town")
                .pos(122.5, 15.5)
                .finish(),
        );
        db.locations.borrow_mut().push(
            Location::build()
                .psgc("0434902000")
                .long_name("Near Town")
                .pos(121.1, 14.05)
                .finish(),
        );

        let epicenter = MapPoint::from_lng_lat_deg(121.0, 14.0);
        let title = resolve_title(&db, epicenter).unwrap();
        assert!(title.ends_with("of Near Town"), "got {title}");
    }

    #[test]
    fn empty_gazetteer_cannot_anchor_a_title() {
        let db = MockDb::default();
        let epicenter = MapPoint::from_lng_lat_deg(121.0, 14.0);
        assert!(matches!(
            resolve_title(&db, epicenter),
            Err(Error::Repo(RepoError::NotFound))
        ));
    }
}
