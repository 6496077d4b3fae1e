//! Geodesic helpers for QTH replies.
//!
//! Everything here is a pure function of its inputs:
//!
//! - [`grid_locator`] encodes a position as a 6-character Maidenhead locator
//! - [`distance_miles`] is the haversine great-circle distance
//! - [`bearing_degrees`] is the initial (forward azimuth) bearing

/// Earth mean radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Kilometre to statute mile factor.
pub const MILES_PER_KM: f64 = 0.621371;

const FIELD_LON_DEG: f64 = 20.0;
const FIELD_LAT_DEG: f64 = 10.0;
const SQUARE_LON_DEG: f64 = 2.0;
const SQUARE_LAT_DEG: f64 = 1.0;
const SUBSQUARE_DIVISIONS: f64 = 24.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate only when both halves are present.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        Some(Self::new(lat?, lon?))
    }

    /// Maidenhead locator for this position.
    pub fn grid_locator(&self) -> String {
        locator_for(self.lat, self.lon)
    }

    /// Great-circle distance to `other` in statute miles.
    pub fn distance_miles_to(&self, other: &Coordinate) -> f64 {
        distance_miles(self.lat, self.lon, other.lat, other.lon)
    }

    /// Initial bearing towards `other`, whole degrees in `0..=359`.
    pub fn bearing_to(&self, other: &Coordinate) -> u16 {
        bearing_degrees(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Encode a position as a 6-character Maidenhead locator.
///
/// Returns `None` when either coordinate is missing. Out-of-range inputs are
/// clamped to the valid latitude/longitude ranges first, so every pair of
/// finite values produces a locator.
pub fn grid_locator(lat: Option<f64>, lon: Option<f64>) -> Option<String> {
    Coordinate::from_parts(lat, lon).map(|coord| coord.grid_locator())
}

fn locator_for(lat: f64, lon: f64) -> String {
    let lat = lat.clamp(-90.0, 90.0) + 90.0;
    let lon = lon.clamp(-180.0, 180.0) + 180.0;

    let field_lon = (lon / FIELD_LON_DEG).floor() as u8;
    let field_lat = (lat / FIELD_LAT_DEG).floor() as u8;
    let square_lon = ((lon % FIELD_LON_DEG) / SQUARE_LON_DEG).floor() as u8;
    let square_lat = ((lat % FIELD_LAT_DEG) / SQUARE_LAT_DEG).floor() as u8;
    let sub_lon = subsquare_index(lon, SQUARE_LON_DEG);
    let sub_lat = subsquare_index(lat, SQUARE_LAT_DEG);

    [
        (b'A' + field_lon) as char,
        (b'A' + field_lat) as char,
        (b'0' + square_lon) as char,
        (b'0' + square_lat) as char,
        (b'a' + sub_lon) as char,
        (b'a' + sub_lat) as char,
    ]
    .iter()
    .collect()
}

// Float error can push the scaled remainder onto 24.0 right below a square edge.
fn subsquare_index(shifted: f64, square_deg: f64) -> u8 {
    let fraction = (shifted % square_deg) / square_deg;
    ((fraction * SUBSQUARE_DIVISIONS).floor() as u8).min(23)
}

/// Haversine distance between two points, in statute miles.
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let p1 = lat1.to_radians();
    let p2 = lat2.to_radians();
    let dp = (lat2 - lat1).to_radians();
    let dl = (lon2 - lon1).to_radians();

    let a = (dp / 2.0).sin().powi(2) + p1.cos() * p2.cos() * (dl / 2.0).sin().powi(2);
    // Near-antipodal pairs can round `a` just past 1.0.
    let a = a.clamp(0.0, 1.0);
    let central_angle = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * central_angle * MILES_PER_KM
}

/// Initial bearing from point 1 towards point 2.
///
/// Measured clockwise from true north and rounded to the nearest whole
/// degree. A value that rounds up to 360 is reported as 0.
pub fn bearing_degrees(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> u16 {
    let p1 = lat1.to_radians();
    let p2 = lat2.to_radians();
    let dl = (lon2 - lon1).to_radians();

    let y = dl.sin() * p2.cos();
    let x = p1.cos() * p2.sin() - p1.sin() * p2.cos() * dl.cos();
    let degrees = (y.atan2(x).to_degrees() + 360.0) % 360.0;

    (degrees.round() as u16) % 360
}
