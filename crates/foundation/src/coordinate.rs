use serde::{Deserialize, Serialize};

use crate::math::GeoPoint;

/// Latitude/longitude pair in degrees, latitude first.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl Coordinate {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    pub fn is_finite(&self) -> bool {
        self.lat_deg.is_finite() && self.lon_deg.is_finite()
    }
}

impl From<Coordinate> for GeoPoint {
    fn from(c: Coordinate) -> Self {
        GeoPoint::new(c.lon_deg, c.lat_deg)
    }
}

impl From<GeoPoint> for Coordinate {
    fn from(p: GeoPoint) -> Self {
        Coordinate::new(p.lat_deg, p.lon_deg)
    }
}
