//! Readers for the CSV dumps the portal is seeded from.
//!
//! Rows that cannot be interpreted are logged and skipped so one stray
//! line never aborts a bulk load, mirroring how the use case layer
//! treats malformed reports.

use std::{fs::File, io, path::Path};

use anyhow::Result;
use serde::Deserialize;
use time::{Date, Month, PrimitiveDateTime, Time};

use sismika_core::usecases::NewEarthquake;
use sismika_entities::{
    geo::MapPoint,
    location::Location,
    station::SeismicStation,
    time::Timestamp,
};

/// Row of the earthquake archive dump.
///
/// The date is split over six columns and a magnitude of zero stands
/// for "not measured" in the archive. The `mi` column carries the local
/// magnitude.
#[derive(Debug, Deserialize)]
struct EarthquakeRecord {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    longitude: f64,
    latitude: f64,
    depth: f64,
    #[serde(default)]
    mi: Option<f64>,
    #[serde(default)]
    mb: Option<f64>,
    #[serde(default)]
    ms: Option<f64>,
    #[serde(default)]
    mw: Option<f64>,
    #[serde(default)]
    intensity: String,
}

impl EarthquakeRecord {
    fn occurred_at(&self) -> Option<Timestamp> {
        let month = Month::try_from(self.month).ok()?;
        let date = Date::from_calendar_date(self.year, month, self.day).ok()?;
        let time = Time::from_hms(self.hour, self.minute, self.second).ok()?;
        Some(PrimitiveDateTime::new(date, time).assume_utc().into())
    }

    fn into_report(self) -> Option<NewEarthquake> {
        let occurred_at = self.occurred_at()?;
        Some(NewEarthquake {
            occurred_at,
            lng: self.longitude,
            lat: self.latitude,
            depth_km: self.depth,
            ml: magnitude(self.mi),
            mb: magnitude(self.mb),
            ms: magnitude(self.ms),
            mw: magnitude(self.mw),
            local_intensity: self.intensity,
        })
    }
}

fn magnitude(reading: Option<f64>) -> Option<f64> {
    reading.filter(|m| *m != 0.0)
}

/// Row of the station registry dump.
#[derive(Debug, Deserialize)]
struct StationRecord {
    code: String,
    long: f64,
    lat: f64,
    long_name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Row of the PSGC gazetteer dump. The publication lacks coordinates
/// for some places, so both columns may be empty.
#[derive(Debug, Deserialize)]
struct LocationRecord {
    psgc: String,
    name: String,
    long_name: String,
    level: String,
    #[serde(default)]
    population: Option<u64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    latitude: Option<f64>,
}

pub fn read_earthquakes(path: &Path) -> Result<Vec<NewEarthquake>> {
    parse_earthquakes(File::open(path)?)
}

fn parse_earthquakes<R: io::Read>(rdr: R) -> Result<Vec<NewEarthquake>> {
    let mut reports = Vec::new();
    for (row, result) in csv::Reader::from_reader(rdr).deserialize().enumerate() {
        let record: EarthquakeRecord = match result {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Skipping earthquake row {}: {err}", row + 1);
                continue;
            }
        };
        match record.into_report() {
            Some(report) => reports.push(report),
            None => log::warn!("Skipping earthquake row {}: invalid date", row + 1),
        }
    }
    Ok(reports)
}

pub fn read_stations(path: &Path) -> Result<Vec<SeismicStation>> {
    parse_stations(File::open(path)?)
}

fn parse_stations<R: io::Read>(rdr: R) -> Result<Vec<SeismicStation>> {
    let mut stations = Vec::new();
    for (row, result) in csv::Reader::from_reader(rdr).deserialize().enumerate() {
        let record: StationRecord = match result {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Skipping station row {}: {err}", row + 1);
                continue;
            }
        };
        let Some(pos) = MapPoint::try_from_lng_lat_deg(record.long, record.lat) else {
            log::warn!("Skipping station {}: position out of range", record.code);
            continue;
        };
        stations.push(SeismicStation {
            code: record.code,
            name: record.long_name,
            kind: record.kind,
            pos,
        });
    }
    Ok(stations)
}

pub fn read_locations(path: &Path) -> Result<Vec<Location>> {
    parse_locations(File::open(path)?)
}

fn parse_locations<R: io::Read>(rdr: R) -> Result<Vec<Location>> {
    let mut locations = Vec::new();
    for (row, result) in csv::Reader::from_reader(rdr).deserialize().enumerate() {
        let record: LocationRecord = match result {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Skipping gazetteer row {}: {err}", row + 1);
                continue;
            }
        };
        let Ok(psgc) = record.psgc.parse() else {
            log::warn!("Skipping gazetteer row {}: invalid PSGC code", row + 1);
            continue;
        };
        let Ok(level) = record.level.parse() else {
            log::warn!(
                "Skipping gazetteer row {}: unknown level '{}'",
                row + 1,
                record.level
            );
            continue;
        };
        let pos = match (record.longitude, record.latitude) {
            (Some(lng), Some(lat)) => MapPoint::try_from_lng_lat_deg(lng, lat),
            _ => None,
        };
        locations.push(Location {
            psgc,
            name: record.name,
            long_name: record.long_name,
            level,
            population: record.population.unwrap_or(0),
            pos,
            bounds: None,
        });
    }
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sismika_entities::location::GeographicLevel;

    #[test]
    fn earthquake_rows_compose_dates_and_drop_zero_magnitudes() {
        let csv = "\
year,month,day,hour,minute,second,longitude,latitude,depth,mi,mb,ms,mw,intensity
2023,7,12,10,5,30,121.5,14.2,33,5.1,0.0,,4.9,IV
2023,2,30,0,0,0,121.0,14.0,10,5.0,0,0,0,
";
        let reports = parse_earthquakes(csv.as_bytes()).unwrap();

        // The second row names a date that does not exist.
        assert_eq!(1, reports.len());
        let report = &reports[0];
        assert_eq!(
            "2023-07-12T10:05:30Z".parse::<Timestamp>().unwrap(),
            report.occurred_at
        );
        assert_eq!(121.5, report.lng);
        assert_eq!(14.2, report.lat);
        assert_eq!(33.0, report.depth_km);
        assert_eq!(Some(5.1), report.ml);
        assert_eq!(None, report.mb);
        assert_eq!(None, report.ms);
        assert_eq!(Some(4.9), report.mw);
        assert_eq!("IV", report.local_intensity);
    }

    #[test]
    fn garbled_earthquake_rows_are_skipped() {
        let csv = "\
year,month,day,hour,minute,second,longitude,latitude,depth,mi,mb,ms,mw,intensity
not-a-year,1,1,0,0,0,121.0,14.0,10,5.0,,,,
2023,1,1,0,0,0,121.0,14.0,10,5.0,,,,
";
        let reports = parse_earthquakes(csv.as_bytes()).unwrap();
        assert_eq!(1, reports.len());
    }

    #[test]
    fn station_rows_take_the_long_name() {
        let csv = "\
code,long,lat,long_name,type
MNL,121.0,14.6,Manila Observatory,broadband
BAD,200.0,14.6,Nowhere,broadband
";
        let stations = parse_stations(csv.as_bytes()).unwrap();

        assert_eq!(1, stations.len());
        let station = &stations[0];
        assert_eq!("MNL", station.code);
        assert_eq!("Manila Observatory", station.name);
        assert_eq!("broadband", station.kind);
        assert_eq!(MapPoint::from_lng_lat_deg(121.0, 14.6), station.pos);
    }

    #[test]
    fn gazetteer_rows_keep_places_without_coordinates() {
        let csv = "\
psgc,name,long_name,level,population,longitude,latitude
0434917000,Mauban,\"Mauban, Quezon\",Mun,71081,121.7338,14.1906
0434910000,Lucban,\"Lucban, Quezon\",Mun,,,
043491701x,Broken,Broken,Mun,1,,
0434900000,Quezon,Quezon,Village,1,,
";
        let locations = parse_locations(csv.as_bytes()).unwrap();

        // The malformed code and the unknown level are both skipped.
        assert_eq!(2, locations.len());
        assert_eq!("Mauban", locations[0].name);
        assert_eq!("Mauban, Quezon", locations[0].long_name);
        assert_eq!(GeographicLevel::Municipality, locations[0].level);
        assert_eq!(71_081, locations[0].population);
        assert_eq!(
            Some(MapPoint::from_lng_lat_deg(121.7338, 14.1906)),
            locations[0].pos
        );
        assert_eq!("Lucban", locations[1].name);
        assert_eq!(0, locations[1].population);
        assert_eq!(None, locations[1].pos);
    }
}
