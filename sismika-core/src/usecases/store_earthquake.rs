use crate::{
    seismo::{self, MagnitudeReadings},
    usecases::{authorize::authorize_min_permission, prelude::*, resolve_title::resolve_title},
    util::validate::{self, EarthquakeInvalidation, Validate},
};

/// Raw parameters of a reported earthquake, before any derivation.
///
/// The magnitudes arrive as whatever subset the reporting network
/// published; the unified moment magnitude is derived on storage.
#[rustfmt::skip]
#[derive(Default, Debug, Clone)]
pub struct NewEarthquake {
    pub occurred_at     : Timestamp,
    pub lng             : f64,
    pub lat             : f64,
    pub depth_km        : f64,
    pub ml              : Option<f64>,
    pub mb              : Option<f64>,
    pub ms              : Option<f64>,
    pub mw              : Option<f64>,
    pub local_intensity : String,
}

impl Validate for NewEarthquake {
    type Error = EarthquakeInvalidation;
    fn validate(&self) -> std::result::Result<(), Self::Error> {
        if !validate::is_valid_depth_km(self.depth_km) {
            return Err(Self::Error::Depth);
        }
        for m in [self.ml, self.mb, self.ms, self.mw].into_iter().flatten() {
            if !validate::is_valid_magnitude(m) {
                return Err(Self::Error::Magnitude);
            }
        }
        Ok(())
    }
}

pub(super) struct EventParts {
    pub epicenter: MapPoint,
    pub magnitudes: Magnitudes,
}

/// Validates the raw report and derives the parts every stored event
/// needs: a checked epicenter and a unified moment magnitude.
pub(super) fn resolve_event_parts(new: &NewEarthquake) -> Result<EventParts> {
    new.validate()?;
    let epicenter =
        MapPoint::try_from_lng_lat_deg(new.lng, new.lat).ok_or(Error::InvalidPosition)?;
    let readings = MagnitudeReadings {
        ml: new.ml,
        mb: new.mb,
        ms: new.ms,
        mw: new.mw,
    };
    let mw = seismo::unified_moment_magnitude(readings).ok_or(Error::UnresolvableMagnitude)?;
    Ok(EventParts {
        epicenter,
        magnitudes: Magnitudes {
            ml: new.ml,
            mb: new.mb,
            ms: new.ms,
            mw,
        },
    })
}

/// Stores a newly reported earthquake with a freshly derived title.
///
/// Unlike the archive import, a report submitted through the portal
/// must carry a felt-intensity description.
pub fn store_earthquake<R>(repo: &R, auth: &User, new: NewEarthquake) -> Result<EarthquakeEvent>
where
    R: EarthquakeRepo + LocationRepo,
{
    authorize_min_permission(auth, Permission::Researcher)?;
    if new.local_intensity.trim().is_empty() {
        return Err(Error::Intensity);
    }
    let parts = resolve_event_parts(&new)?;
    let title = resolve_title(repo, parts.epicenter)?;
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
    log::info!("Stored earthquake {} ({})", event.id, event.title);
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use sismika_entities::builders::*;

    fn researcher() -> User {
        User {
            subject: SubjectId::from("auth0|researcher"),
            name: "Researcher".into(),
            email: "researcher@example.ph".into(),
            picture: String::new(),
            permission: Permission::Researcher,
        }
    }

    fn sample_gazetteer(db: &MockDb) {
        db.locations.borrow_mut().push(
            Location::build()
                .psgc("0434917000")
                .long_name("Mauban, Quezon")
                .pos(121.3893, 14.0)
                .finish(),
        );
    }

    #[test]
    fn stored_event_gets_title_and_unified_magnitude() {
        let db = MockDb::default();
        sample_gazetteer(&db);

        let new = NewEarthquake {
            occurred_at: Timestamp::from_secs(1_700_000_000),
            lng: 121.0,
            lat: 14.0,
            depth_km: 10.0,
            ml: Some(5.5),
            local_intensity: "IV".into(),
            ..Default::default()
        };
        let event = store_earthquake(&db, &researcher(), new).unwrap();

        assert_eq!("42km West of Mauban, Quezon", event.title);
        assert_eq!(Some(5.5), event.magnitudes.ml);
        assert_eq!(5.5, event.magnitudes.mw);
        assert_eq!(1, db.earthquakes.borrow().len());
    }

    #[test]
    fn reported_moment_magnitude_is_kept_verbatim() {
        let db = MockDb::default();
        sample_gazetteer(&db);

        let new = NewEarthquake {
            lng: 121.0,
            lat: 14.0,
            depth_km: 33.0,
            ml: Some(6.9),
            mw: Some(7.135),
            local_intensity: "VII".into(),
            ..Default::default()
        };
        let event = store_earthquake(&db, &researcher(), new).unwrap();
        assert_eq!(7.135, event.magnitudes.mw);
    }

    #[test]
    fn report_without_any_magnitude_is_rejected() {
        let db = MockDb::default();
        sample_gazetteer(&db);

        let new = NewEarthquake {
            lng: 121.0,
            lat: 14.0,
            depth_km: 10.0,
            local_intensity: "II".into(),
            ..Default::default()
        };
        assert!(matches!(
            store_earthquake(&db, &researcher(), new),
            Err(Error::UnresolvableMagnitude)
        ));
        assert!(db.earthquakes.borrow().is_empty());
    }

    #[test]
    fn report_without_intensity_text_is_rejected() {
        let db = MockDb::default();
        sample_gazetteer(&db);

        let new = NewEarthquake {
            lng: 121.0,
            lat: 14.0,
            depth_km: 10.0,
            ml: Some(4.0),
            local_intensity: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(
            store_earthquake(&db, &researcher(), new),
            Err(Error::Intensity)
        ));
        assert!(db.earthquakes.borrow().is_empty());
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        let db = MockDb::default();
        sample_gazetteer(&db);

        let new = NewEarthquake {
            lng: 181.0,
            lat: 14.0,
            depth_km: 10.0,
            ml: Some(4.0),
            local_intensity: "III".into(),
            ..Default::default()
        };
        assert!(matches!(
            store_earthquake(&db, &researcher(), new),
            Err(Error::InvalidPosition)
        ));
    }

    #[test]
    fn negative_depth_is_rejected() {
        let db = MockDb::default();
        sample_gazetteer(&db);

        let new = NewEarthquake {
            lng: 121.0,
            lat: 14.0,
            depth_km: -3.0,
            ml: Some(4.0),
            local_intensity: "III".into(),
            ..Default::default()
        };
        assert!(matches!(
            store_earthquake(&db, &researcher(), new),
            Err(Error::Depth)
        ));
    }

    #[test]
    fn storing_requires_researcher_permission() {
        let db = MockDb::default();
        sample_gazetteer(&db);

        let mut guest = researcher();
        guest.permission = Permission::None;
        let new = NewEarthquake {
            lng: 121.0,
            lat: 14.0,
            depth_km: 10.0,
            ml: Some(4.0),
            ..Default::default()
        };
        assert!(matches!(
            store_earthquake(&db, &guest, new),
            Err(Error::Forbidden)
        ));
        assert!(db.earthquakes.borrow().is_empty());
    }
}
