use geo::Coord;
use serde::Serialize;

use crate::{
    constants::POLYLINE_PRECISION, error::GuidanceError, geopoint::CoordinatePrecision,
    segment::TravelSegment,
};

/// Route shape as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteGeometry {
    /// Google encoded polyline.
    Encoded(String),
    /// `[lat, lon]` pairs in decimal degrees.
    Coordinates(Vec<[f64; 2]>),
}

pub fn route_geometry(
    segments: &[TravelSegment],
    encoded: bool,
    precision: CoordinatePrecision,
) -> Result<RouteGeometry, GuidanceError> {
    if encoded {
        encode_polyline(segments, precision).map(RouteGeometry::Encoded)
    } else {
        Ok(RouteGeometry::Coordinates(coordinates(segments, precision)))
    }
}

/// Polyline of the necessary points, precision 5.
pub fn encode_polyline(
    segments: &[TravelSegment],
    precision: CoordinatePrecision,
) -> Result<String, GuidanceError> {
    let coordinates = segments
        .iter()
        .filter(|segment| segment.necessary)
        .map(|segment| Coord {
            x: segment.location.lon_degrees(precision),
            y: segment.location.lat_degrees(precision),
        });

    ::polyline::encode_coordinates(coordinates, POLYLINE_PRECISION)
        .map_err(|error| GuidanceError::GeometryEncoding(error.to_string()))
}

pub fn coordinates(segments: &[TravelSegment], precision: CoordinatePrecision) -> Vec<[f64; 2]> {
    segments
        .iter()
        .filter(|segment| segment.necessary)
        .map(|segment| {
            [
                segment.location.lat_degrees(precision),
                segment.location.lon_degrees(precision),
            ]
        })
        .collect()
}
