//! Great-circle primitives on a spherical Earth.
//!
//! Points are expressed as [`GeoPoint`] in longitude/latitude order, matching
//! GeoJSON positions. Callers holding a [`crate::Coordinate`] (latitude first)
//! convert through `From` rather than swapping fields by hand.

use serde::{Deserialize, Serialize};

/// Mean Earth radius (meters), IUGG value.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Geographic point in degrees, longitude first.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// Haversine distance between two points (meters).
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat_deg.to_radians();
    let lat2 = b.lat_deg.to_radians();
    let dlat = (b.lat_deg - a.lat_deg).to_radians();
    let dlon = (b.lon_deg - a.lon_deg).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push `h` marginally above 1 for antipodal points.
    2.0 * EARTH_MEAN_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Initial bearing from `a` towards `b`, degrees clockwise from north in (-180, 180].
pub fn bearing_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat_deg.to_radians();
    let lat2 = b.lat_deg.to_radians();
    let dlon = (b.lon_deg - a.lon_deg).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x).to_degrees()
}

/// Point reached by travelling `distance_m` from `origin` along `bearing_deg`.
pub fn destination(origin: GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoPoint {
    let lat1 = origin.lat_deg.to_radians();
    let lon1 = origin.lon_deg.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_m / EARTH_MEAN_RADIUS_M;

    let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

    GeoPoint::new(normalize_lon_deg(lon2.to_degrees()), lat2.to_degrees())
}

/// Total length of an ordered point sequence (meters).
pub fn path_length_m(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| distance_m(w[0], w[1])).sum()
}

/// Wrap a longitude into [-180, 180).
pub fn normalize_lon_deg(lon_deg: f64) -> f64 {
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::{
        EARTH_MEAN_RADIUS_M, GeoPoint, bearing_deg, destination, distance_m, normalize_lon_deg,
        path_length_m,
    };

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn distance_along_equator() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.01, 0.0);
        let expected = EARTH_MEAN_RADIUS_M * 0.01_f64.to_radians();
        assert_close(distance_m(a, b), expected, 1e-6);
        assert_close(distance_m(a, b), 1111.95, 0.01);
    }

    #[test]
    fn distance_same_point_is_zero() {
        let p = GeoPoint::new(16.3738, 48.2082);
        assert_eq!(distance_m(p, p), 0.0);
    }

    #[test]
    fn distance_known_city_pair() {
        // Vienna to Bratislava is roughly 55 km.
        let vienna = GeoPoint::new(16.3738, 48.2082);
        let bratislava = GeoPoint::new(17.1077, 48.1486);
        let d = distance_m(vienna, bratislava);
        assert!(d > 50_000.0 && d < 60_000.0, "got {d:.0} m");
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert_close(bearing_deg(origin, GeoPoint::new(0.0, 1.0)), 0.0, 1e-9);
        assert_close(bearing_deg(origin, GeoPoint::new(1.0, 0.0)), 90.0, 1e-9);
        assert_close(bearing_deg(origin, GeoPoint::new(0.0, -1.0)), 180.0, 1e-9);
        assert_close(bearing_deg(origin, GeoPoint::new(-1.0, 0.0)), -90.0, 1e-9);
    }

    #[test]
    fn destination_east_along_equator() {
        let p = destination(GeoPoint::new(0.0, 0.0), 1000.0, 90.0);
        assert_close(p.lat_deg, 0.0, 1e-12);
        assert_close(p.lon_deg, (1000.0 / EARTH_MEAN_RADIUS_M).to_degrees(), 1e-12);
        assert_close(p.lon_deg, 0.008_993, 1e-6);
    }

    #[test]
    fn destination_inverts_distance_and_bearing() {
        let origin = GeoPoint::new(13.405, 52.52);
        let target = GeoPoint::new(13.52, 52.47);
        let d = distance_m(origin, target);
        let b = bearing_deg(origin, target);
        let reached = destination(origin, d, b);
        assert_close(reached.lon_deg, target.lon_deg, 1e-9);
        assert_close(reached.lat_deg, target.lat_deg, 1e-9);
    }

    #[test]
    fn destination_wraps_antimeridian() {
        let p = destination(GeoPoint::new(179.999, 0.0), 1000.0, 90.0);
        assert!(p.lon_deg < -179.99, "got {}", p.lon_deg);
    }

    #[test]
    fn path_length_sums_segments() {
        let pts = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(2.0, 0.0),
        ];
        let one_degree = EARTH_MEAN_RADIUS_M * 1.0_f64.to_radians();
        assert_close(path_length_m(&pts), 2.0 * one_degree, 1e-6);
        assert_eq!(path_length_m(&pts[..1]), 0.0);
        assert_eq!(path_length_m(&[]), 0.0);
    }

    #[test]
    fn normalize_lon_range() {
        assert_close(normalize_lon_deg(190.0), -170.0, 1e-12);
        assert_close(normalize_lon_deg(-190.0), 170.0, 1e-12);
        assert_close(normalize_lon_deg(45.0), 45.0, 1e-12);
    }
}
