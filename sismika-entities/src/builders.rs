pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{earthquake_builder::*, location_builder::*};

pub mod earthquake_builder {

    use super::*;
    use crate::{event::*, geo::MapPoint, id::Id, time::Timestamp};

    #[derive(Debug)]
    pub struct EarthquakeEventBuild {
        event: EarthquakeEvent,
    }

    impl EarthquakeEventBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.event.id = id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.event.title = title.into();
            self
        }
        pub fn occurred_at(mut self, at: Timestamp) -> Self {
            self.event.occurred_at = at;
            self
        }
        pub fn epicenter(mut self, lng: f64, lat: f64) -> Self {
            self.event.epicenter = MapPoint::from_lng_lat_deg(lng, lat);
            self
        }
        pub fn depth_km(mut self, depth_km: f64) -> Self {
            self.event.depth_km = depth_km;
            self
        }
        pub fn mw(mut self, mw: f64) -> Self {
            self.event.magnitudes.mw = mw;
            self
        }
        pub fn ml(mut self, ml: f64) -> Self {
            self.event.magnitudes.ml = Some(ml);
            self
        }
        pub fn mb(mut self, mb: f64) -> Self {
            self.event.magnitudes.mb = Some(mb);
            self
        }
        pub fn ms(mut self, ms: f64) -> Self {
            self.event.magnitudes.ms = Some(ms);
            self
        }
        pub fn local_intensity(mut self, li: &str) -> Self {
            self.event.local_intensity = li.into();
            self
        }
        pub fn finish(self) -> EarthquakeEvent {
            self.event
        }
    }

    impl Builder for EarthquakeEvent {
        type Build = EarthquakeEventBuild;
        fn build() -> Self::Build {
            EarthquakeEventBuild {
                event: EarthquakeEvent {
                    id: Id::new(),
                    title: String::new(),
                    occurred_at: Timestamp::from_secs(0),
                    epicenter: MapPoint::default(),
                    depth_km: 10.0,
                    magnitudes: Magnitudes {
                        ml: None,
                        mb: None,
                        ms: None,
                        mw: 5.0,
                    },
                    local_intensity: String::new(),
                },
            }
        }
    }
}

pub mod location_builder {

    use super::*;
    use crate::{
        geo::{GeoBounds, MapPoint},
        location::*,
    };

    #[derive(Debug)]
    pub struct LocationBuild {
        location: Location,
    }

    impl LocationBuild {
        pub fn psgc(mut self, code: &str) -> Self {
            self.location.psgc = code.parse().unwrap();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.location.name = name.into();
            self
        }
        pub fn long_name(mut self, long_name: &str) -> Self {
            self.location.long_name = long_name.into();
            self
        }
        pub fn level(mut self, level: GeographicLevel) -> Self {
            self.location.level = level;
            self
        }
        pub fn population(mut self, population: u64) -> Self {
            self.location.population = population;
            self
        }
        pub fn pos(mut self, lng: f64, lat: f64) -> Self {
            self.location.pos = Some(MapPoint::from_lng_lat_deg(lng, lat));
            self
        }
        pub fn bounds(mut self, bounds: GeoBounds) -> Self {
            self.location.bounds = Some(bounds);
            self
        }
        pub fn finish(self) -> Location {
            self.location
        }
    }

    impl Builder for Location {
        type Build = LocationBuild;
        fn build() -> Self::Build {
            LocationBuild {
                location: Location {
                    psgc: "0000000000".parse().unwrap(),
                    name: String::new(),
                    long_name: String::new(),
                    level: GeographicLevel::Municipality,
                    population: 0,
                    pos: None,
                    bounds: None,
                },
            }
        }
    }
}
