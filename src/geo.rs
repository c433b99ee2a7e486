use std::f64::consts::PI;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance from any point to its antipode along the surface
pub const EARTH_HALF_CIRCUMFERENCE_KM: f64 = EARTH_RADIUS_KM * PI;

/// A geographic coordinate in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// Latitude in [-90, 90]
    pub lat: f64,
    /// Longitude in [-180, 180]
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Initial bearing and great-circle distance from one point to another
#[derive(Clone, Copy, Debug)]
pub struct BearingDistance {
    /// Radians clockwise from true north, in (-π, π]
    pub bearing: f64,
    /// Kilometers along the surface, >= 0
    pub distance: f64,
}

/// Compute initial bearing and great-circle distance from `center` to `target`.
///
/// Distance uses the haversine formula (stable for small separations),
/// bearing the standard atan2 form. `center == target` yields distance 0 and
/// an arbitrary bearing (`atan2(0, 0)`); callers must tolerate that rather
/// than treat it as an error.
#[inline]
pub fn bearing_and_distance(center: GeoPoint, target: GeoPoint) -> BearingDistance {
    let lat1 = center.lat.to_radians();
    let lat2 = target.lat.to_radians();
    let dlat = (target.lat - center.lat).to_radians();
    let dlng = (target.lng - center.lng).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();

    BearingDistance {
        bearing: y.atan2(x),
        distance: EARTH_RADIUS_KM * c,
    }
}
