use std::fmt;

/// Mean Earth radius in meters, used for surface distances.
pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_371_000.0;

/// Equatorial (WGS84) Earth radius in meters, used to convert surface
/// radii into angular radii the way `$centerSphere` selectors expect.
pub const EARTH_EQUATORIAL_RADIUS_METERS: f64 = 6_378_137.0;

const DEGREES_PER_WIND: f64 = 22.5;

/// Geographical point in degrees, longitude before latitude.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MapPoint {
    lng: f64,
    lat: f64,
}

impl MapPoint {
    /// Creates a new point from longitude/latitude degrees.
    ///
    /// Returns `None` if either coordinate is non-finite or outside of
    /// its valid range.
    pub fn try_from_lng_lat_deg(lng: f64, lat: f64) -> Option<Self> {
        if !lng.is_finite() || !lat.is_finite() {
            return None;
        }
        if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        Some(Self { lng, lat })
    }

    /// Creates a new point from longitude/latitude degrees.
    ///
    /// Panics if the coordinates are invalid, see
    /// [`MapPoint::try_from_lng_lat_deg`].
    pub fn from_lng_lat_deg(lng: f64, lat: f64) -> Self {
        Self::try_from_lng_lat_deg(lng, lat).expect("valid coordinates")
    }

    pub fn lng(self) -> f64 {
        self.lng
    }

    pub fn lat(self) -> f64 {
        self.lat
    }

    /// The central angle between two points in radians, computed with the
    /// haversine formula.
    pub fn central_angle_rad(self, other: Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Great-circle distance in meters over the mean Earth radius.
    pub fn distance_meters(self, other: Self) -> f64 {
        self.central_angle_rad(other) * EARTH_MEAN_RADIUS_METERS
    }

    /// Initial bearing from this point towards `other` in degrees,
    /// normalized to `[0, 360)`. 0° points due north, 90° due east.
    pub fn initial_bearing_deg(self, other: Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let y = delta_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();
        y.atan2(x).to_degrees().rem_euclid(360.0)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

/// One of the sixteen winds of the compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum CompassPoint {
    South,
    #[strum(serialize = "South-Southwest")]
    SouthSouthwest,
    Southwest,
    #[strum(serialize = "West-Southwest")]
    WestSouthwest,
    West,
    #[strum(serialize = "West-Northwest")]
    WestNorthwest,
    Northwest,
    #[strum(serialize = "North-Northwest")]
    NorthNorthwest,
    North,
    #[strum(serialize = "North-Northeast")]
    NorthNortheast,
    Northeast,
    #[strum(serialize = "East-Northeast")]
    EastNortheast,
    East,
    #[strum(serialize = "East-Southeast")]
    EastSoutheast,
    Southeast,
    #[strum(serialize = "South-Southeast")]
    SouthSoutheast,
}

impl CompassPoint {
    /// Maps an initial bearing in degrees to a wind.
    ///
    /// The wind index is `round(bearing / 22.5) mod 16` over a rose that
    /// starts at South and advances through the winds in the order listed
    /// on this enum. A bearing taken from an epicenter towards a reference
    /// place therefore names the side of the *place* on which the
    /// epicenter lies, which is the convention of bulletin titles like
    /// "12km Northeast of Dagupan".
    pub fn from_bearing_deg(bearing_deg: f64) -> Self {
        use CompassPoint::*;
        const ROSE: [CompassPoint; 16] = [
            South,
            SouthSouthwest,
            Southwest,
            WestSouthwest,
            West,
            WestNorthwest,
            Northwest,
            NorthNorthwest,
            North,
            NorthNortheast,
            Northeast,
            EastNortheast,
            East,
            EastSoutheast,
            Southeast,
            SouthSoutheast,
        ];
        let wind = (bearing_deg.rem_euclid(360.0) / DEGREES_PER_WIND).round() as usize;
        ROSE[wind % ROSE.len()]
    }
}

/// Closed quadrilateral on the map, stored as four corners in ring order.
///
/// The ring closes itself by connecting the last corner back to the first
/// one. Containment follows the even-odd rule on the plain lng/lat plane,
/// matching the legacy `$polygon` selector semantics of document stores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    corners: [MapPoint; 4],
}

impl GeoBounds {
    pub const fn new(corners: [MapPoint; 4]) -> Self {
        Self { corners }
    }

    /// Axis-aligned quad from its south-west and north-east corners.
    pub fn from_rect(sw: MapPoint, ne: MapPoint) -> Self {
        let nw = MapPoint {
            lng: sw.lng,
            lat: ne.lat,
        };
        let se = MapPoint {
            lng: ne.lng,
            lat: sw.lat,
        };
        Self::new([sw, nw, ne, se])
    }

    pub const fn corners(&self) -> &[MapPoint; 4] {
        &self.corners
    }

    /// The axis-aligned envelope as `(south-west, north-east)` corners.
    pub fn envelope(&self) -> (MapPoint, MapPoint) {
        let mut min = self.corners[0];
        let mut max = self.corners[0];
        for c in &self.corners[1..] {
            min.lng = min.lng.min(c.lng);
            min.lat = min.lat.min(c.lat);
            max.lng = max.lng.max(c.lng);
            max.lat = max.lat.max(c.lat);
        }
        (min, max)
    }

    /// Even-odd (ray casting) point-in-polygon test.
    pub fn contains(&self, p: MapPoint) -> bool {
        let mut inside = false;
        let mut j = self.corners.len() - 1;
        for i in 0..self.corners.len() {
            let ci = self.corners[i];
            let cj = self.corners[j];
            if (ci.lat > p.lat) != (cj.lat > p.lat)
                && p.lng < (cj.lng - ci.lng) * (p.lat - ci.lat) / (cj.lat - ci.lat) + ci.lng
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Spherical cap around a center point, expressed through its angular
/// radius in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCap {
    center: MapPoint,
    angular_radius_rad: f64,
}

impl SphericalCap {
    pub const fn new(center: MapPoint, angular_radius_rad: f64) -> Self {
        Self {
            center,
            angular_radius_rad,
        }
    }

    /// Cap covering all points within `radius_meters` of `center` on the
    /// surface. The conversion divides by the equatorial radius.
    pub fn from_center_and_radius_meters(center: MapPoint, radius_meters: f64) -> Self {
        Self::new(center, radius_meters / EARTH_EQUATORIAL_RADIUS_METERS)
    }

    pub const fn center(&self) -> MapPoint {
        self.center
    }

    pub const fn angular_radius_rad(&self) -> f64 {
        self.angular_radius_rad
    }

    pub fn contains(&self, p: MapPoint) -> bool {
        self.center.central_angle_rad(p) <= self.angular_radius_rad
    }
}
