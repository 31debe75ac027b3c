//! Spherical helpers shared by the fence and tracking crates.
//!
//! All functions work on plain degrees and meters so they can be used without
//! pulling in any of the model types.

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Great-circle distance between two points in meters.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);

    let dlat = to_radians(latitude_2 - latitude_1);
    let dlon = to_radians(longitude_2 - longitude_1);

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Point reached when travelling `distance_meters` from the origin along the
/// initial bearing `bearing_degrees` (clockwise from north). Returns
/// `(latitude, longitude)` with the longitude wrapped to [-180, 180).
pub fn destination(
    latitude: f64,
    longitude: f64,
    distance_meters: f64,
    bearing_degrees: f64,
) -> (f64, f64) {
    let angular_distance = distance_meters / EARTH_RADIUS_METERS;
    let bearing = to_radians(bearing_degrees);
    let lat_rad = to_radians(latitude);
    let lon_rad = to_radians(longitude);

    let dest_lat = (lat_rad.sin() * angular_distance.cos()
        + lat_rad.cos() * angular_distance.sin() * bearing.cos())
    .asin();
    let dest_lon = lon_rad
        + (bearing.sin() * angular_distance.sin() * lat_rad.cos())
            .atan2(angular_distance.cos() - lat_rad.sin() * dest_lat.sin());

    (to_degrees(dest_lat), wrap_longitude(to_degrees(dest_lon)))
}

pub fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 540.0).rem_euclid(360.0) - 180.0
}

/// Equirectangular projection around a fixed origin. Distances are in meters
/// and stay accurate for corridors of a few tens of kilometers, which is all
/// the route buffer needs.
#[derive(Debug, Clone, Copy)]
pub struct LocalProjection {
    origin_latitude: f64,
    origin_longitude: f64,
    cos_latitude: f64,
}

impl LocalProjection {
    pub fn new(origin_latitude: f64, origin_longitude: f64) -> Self {
        Self {
            origin_latitude,
            origin_longitude,
            cos_latitude: to_radians(origin_latitude).cos(),
        }
    }

    /// Projects `(latitude, longitude)` to `(x, y)` meters east/north of the origin.
    pub fn project(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let x = to_radians(wrap_longitude(longitude - self.origin_longitude))
            * self.cos_latitude
            * EARTH_RADIUS_METERS;
        let y = to_radians(latitude - self.origin_latitude) * EARTH_RADIUS_METERS;
        (x, y)
    }

    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let latitude = self.origin_latitude + to_degrees(y / EARTH_RADIUS_METERS);
        let longitude = self.origin_longitude
            + to_degrees(x / (EARTH_RADIUS_METERS * self.cos_latitude));
        (latitude, wrap_longitude(longitude))
    }
}
