use crate::{
    repositories::Error as RepoError,
    usecases::{
        prelude::*,
        resolve_title::resolve_title,
        store_earthquake::{resolve_event_parts, NewEarthquake},
    },
};

/// Bulk-loads gazetteer entries, replacing any that already exist.
pub fn import_locations<R: LocationRepo>(repo: &R, locations: Vec<Location>) -> Result<usize> {
    let count = locations.len();
    for location in &locations {
        repo.create_or_replace_location(location)?;
    }
    log::info!("Imported {count} gazetteer entries");
    Ok(count)
}

/// Bulk-loads seismic stations. Stations already on record stay as they
/// are.
pub fn import_stations<R: StationRepo>(repo: &R, stations: Vec<SeismicStation>) -> Result<usize> {
    let total = stations.len();
    let mut created = 0;
    for station in &stations {
        match repo.create_station(station) {
            Ok(()) => created += 1,
            Err(RepoError::AlreadyExists) => {
                log::warn!("Station {} already exists, skipping", station.code);
            }
            Err(e) => return Err(Error::Repo(e)),
        }
    }
    log::info!("Imported {created} of {total} stations");
    Ok(created)
}

/// Bulk-loads earthquake reports from the archive.
///
/// Rows that do not resolve into a well-formed event are logged and
/// skipped instead of aborting the batch. With an empty gazetteer the
/// events are stored untitled; a later [`backfill_titles`] pass fills
/// them in once the gazetteer is loaded.
///
/// [`backfill_titles`]: super::backfill_titles
pub fn import_earthquakes<R>(repo: &R, reports: Vec<NewEarthquake>) -> Result<usize>
where
    R: EarthquakeRepo + LocationRepo,
{
    let total = reports.len();
    let mut imported = 0;
    for (row, new) in reports.into_iter().enumerate() {
        let parts = match resolve_event_parts(&new) {
            Ok(parts) => parts,
            Err(err) => {
                log::warn!("Skipping earthquake row {}: {}", row + 1, err);
                continue;
            }
        };
        let title = match resolve_title(repo, parts.epicenter) {
            Ok(title) => title,
            Err(Error::Repo(RepoError::NotFound)) => String::new(),
            Err(err) => return Err(err),
        };
        let event = EarthquakeEvent {
            id: Id::new(),
            title,
            occurred_at: new.occurred_at,
            epicenter: parts.epicenter,
            depth_km: new.depth_km,
            magnitudes: parts.magnitudes,
            local_intensity: new.local_intensity,
        };
        repo.create_earthquake(&event)?;
        imported += 1;
    }
    log::info!("Imported {imported} of {total} earthquake reports");
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use sismika_entities::builders::*;

    #[test]
    fn location_import_replaces_existing_entries() {
        let db = MockDb::default();
        db.locations.borrow_mut().push(
            Location::build()
                .psgc("0434917000")
                .name("Old Name")
                .population(10)
                .finish(),
        );

        let imported = import_locations(
            &db,
            vec![
                Location::build()
                    .psgc("0434917000")
                    .name("New Name")
                    .population(20)
                    .finish(),
                Location::build().psgc("0434918000").finish(),
            ],
        )
        .unwrap();

        assert_eq!(2, imported);
        let locations = db.locations.borrow();
        assert_eq!(2, locations.len());
        let replaced = locations
            .iter()
            .find(|l| l.psgc.as_str() == "0434917000")
            .unwrap();
        assert_eq!("New Name", replaced.name);
        assert_eq!(20, replaced.population);
    }

    #[test]
    fn station_import_skips_known_codes() {
        let db = MockDb::default();
        db.stations.borrow_mut().push(SeismicStation {
            code: "MNL".into(),
            name: "Manila".into(),
            kind: "broadband".into(),
            pos: MapPoint::from_lng_lat_deg(121.0, 14.6),
        });

        let created = import_stations(
            &db,
            vec![
                SeismicStation {
                    code: "MNL".into(),
                    name: "Manila (duplicate)".into(),
                    kind: "broadband".into(),
                    pos: MapPoint::from_lng_lat_deg(121.0, 14.6),
                },
                SeismicStation {
                    code: "DVO".into(),
                    name: "Davao".into(),
                    kind: "short-period".into(),
                    pos: MapPoint::from_lng_lat_deg(125.6, 7.1),
                },
            ],
        )
        .unwrap();

        assert_eq!(1, created);
        let stations = db.stations.borrow();
        assert_eq!(2, stations.len());
        // The original record wins over the duplicate row.
        let kept = stations.iter().find(|s| s.code == "MNL").unwrap();
        assert_eq!("Manila", kept.name);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let db = MockDb::default();
        db.locations.borrow_mut().push(
            Location::build()
                .psgc("0434917000")
                .long_name("Mauban, Quezon")
                .pos(121.3893, 14.0)
                .finish(),
        );

        let rows = vec![
            NewEarthquake {
                lng: 121.0,
                lat: 14.0,
                depth_km: 10.0,
                ml: Some(5.0),
                ..Default::default()
            },
            // No magnitude at all.
            NewEarthquake {
                lng: 121.0,
                lat: 14.0,
                depth_km: 10.0,
                ..Default::default()
            },
            // Negative depth.
            NewEarthquake {
                lng: 121.0,
                lat: 14.0,
                depth_km: -5.0,
                ml: Some(5.0),
                ..Default::default()
            },
        ];
        let imported = import_earthquakes(&db, rows).unwrap();

        assert_eq!(1, imported);
        let earthquakes = db.earthquakes.borrow();
        assert_eq!(1, earthquakes.len());
        assert_eq!("42km West of Mauban, Quezon", earthquakes[0].title);
    }

    #[test]
    fn events_without_gazetteer_are_stored_untitled() {
        let db = MockDb::default();
        let rows = vec![NewEarthquake {
            lng: 121.0,
            lat: 14.0,
            depth_km: 10.0,
            ml: Some(5.0),
            ..Default::default()
        }];
        let imported = import_earthquakes(&db, rows).unwrap();

        assert_eq!(1, imported);
        assert_eq!("", db.earthquakes.borrow()[0].title);
    }
}
