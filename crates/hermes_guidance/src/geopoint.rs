use geo::{Bearing, Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::meters::Meters;

/// Number of fixed-point units in one degree.
///
/// The routing data stores coordinates as integers; this scale is passed
/// explicitly wherever they are turned back into decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePrecision(f64);

impl CoordinatePrecision {
    pub const MICRO_DEGREES: CoordinatePrecision = CoordinatePrecision(1_000_000.0);

    pub fn new(units_per_degree: f64) -> Self {
        CoordinatePrecision(units_per_degree)
    }

    pub fn units_per_degree(&self) -> f64 {
        self.0
    }

    pub fn to_degrees(&self, value: i32) -> f64 {
        value as f64 / self.0
    }

    pub fn to_fixed(&self, degrees: f64) -> i32 {
        (degrees * self.0).round() as i32
    }
}

impl Default for CoordinatePrecision {
    fn default() -> Self {
        CoordinatePrecision::MICRO_DEGREES
    }
}

/// A fixed-point WGS84 coordinate as stored by the routing graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: i32,
    pub lon: i32,
}

impl GeoPoint {
    pub fn new(lat: i32, lon: i32) -> Self {
        GeoPoint { lat, lon }
    }

    pub fn from_degrees(lat: f64, lon: f64, precision: CoordinatePrecision) -> Self {
        GeoPoint {
            lat: precision.to_fixed(lat),
            lon: precision.to_fixed(lon),
        }
    }

    pub fn lat_degrees(&self, precision: CoordinatePrecision) -> f64 {
        precision.to_degrees(self.lat)
    }

    pub fn lon_degrees(&self, precision: CoordinatePrecision) -> f64 {
        precision.to_degrees(self.lon)
    }

    pub fn to_point(&self, precision: CoordinatePrecision) -> Point<f64> {
        Point::new(self.lon_degrees(precision), self.lat_degrees(precision))
    }

    pub fn haversine_distance(&self, other: &GeoPoint, precision: CoordinatePrecision) -> Meters {
        let haversine = Haversine;
        Meters::new(haversine.distance(self.to_point(precision), other.to_point(precision)))
    }

    /// Initial great-circle bearing towards `other`, in degrees within `[0, 360)`.
    pub fn bearing(&self, other: &GeoPoint, precision: CoordinatePrecision) -> f64 {
        let haversine = Haversine;
        haversine
            .bearing(self.to_point(precision), other.to_point(precision))
            .rem_euclid(360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRECISION: CoordinatePrecision = CoordinatePrecision::MICRO_DEGREES;

    #[test]
    fn test_precision_conversion() {
        assert_eq!(PRECISION.to_degrees(1_000_000), 1.0);
        assert_eq!(PRECISION.to_degrees(-500_000), -0.5);
        assert_eq!(PRECISION.to_fixed(4.587283), 4_587_283);

        let coarse = CoordinatePrecision::new(100_000.0);
        assert_eq!(coarse.to_degrees(123_456), 1.23456);
    }

    #[test]
    fn test_haversine_distance() {
        let a = GeoPoint::new(0, 0);
        let b = GeoPoint::new(1_000, 0);

        // One thousandth of a degree of latitude is a little over 111 meters
        let distance = a.haversine_distance(&b, PRECISION).value();
        assert!((distance - 111.19).abs() < 0.1, "distance was {distance}");
        assert_eq!(a.haversine_distance(&a, PRECISION), Meters::ZERO);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(0, 0);

        assert!(origin.bearing(&GeoPoint::new(1_000, 0), PRECISION).abs() < 1e-6);
        assert!((origin.bearing(&GeoPoint::new(0, 1_000), PRECISION) - 90.0).abs() < 1e-6);
        assert!((origin.bearing(&GeoPoint::new(-1_000, 0), PRECISION) - 180.0).abs() < 1e-6);
        assert!((origin.bearing(&GeoPoint::new(0, -1_000), PRECISION) - 270.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_degrees() {
        let point = GeoPoint::from_degrees(50.8503, 4.3517, PRECISION);
        assert_eq!(point, GeoPoint::new(50_850_300, 4_351_700));
        assert_eq!(point.lat_degrees(PRECISION), 50.8503);
    }
}
