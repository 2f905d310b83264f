//! Zoom-dependent line generalization of a segment list.
//!
//! Points are never removed: a point that survives is flagged `necessary`,
//! every other point keeps its flag untouched. Points that were already
//! necessary split the route into independent ranges.

use tracing::debug;

use crate::{
    constants::MAX_ZOOM_LEVEL,
    geopoint::{CoordinatePrecision, GeoPoint},
    segment::TravelSegment,
};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Maximal deviation in meters a dropped point may have, per zoom level.
const DOUGLAS_PEUCKER_THRESHOLDS: [f64; MAX_ZOOM_LEVEL as usize + 1] = [
    512_440.0, // z0
    256_720.0, // z1
    122_560.0, // z2
    56_780.0,  // z3
    28_800.0,  // z4
    14_400.0,  // z5
    7_200.0,   // z6
    3_200.0,   // z7
    2_400.0,   // z8
    1_100.0,   // z9
    650.0,     // z10
    390.0,     // z11
    260.0,     // z12
    80.0,      // z13
    40.0,      // z14
    20.0,      // z15
    10.0,      // z16
    5.0,       // z17
    2.0,       // z18
];

pub fn threshold_for_zoom(zoom_level: u8) -> f64 {
    DOUGLAS_PEUCKER_THRESHOLDS[zoom_level.min(MAX_ZOOM_LEVEL) as usize]
}

pub fn simplify(
    segments: Vec<TravelSegment>,
    zoom_level: u8,
    precision: CoordinatePrecision,
) -> Vec<TravelSegment> {
    simplify_with_tolerance(segments, threshold_for_zoom(zoom_level), precision)
}

pub fn simplify_with_tolerance(
    mut segments: Vec<TravelSegment>,
    tolerance: f64,
    precision: CoordinatePrecision,
) -> Vec<TravelSegment> {
    if segments.len() < 2 {
        return segments;
    }

    let last = segments.len() - 1;
    segments[0].necessary = true;
    segments[last].necessary = true;

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut left = 0;
    for right in 1..segments.len() {
        if segments[right].necessary {
            if right - left > 1 {
                ranges.push((left, right));
            }
            left = right;
        }
    }

    while let Some((first, second)) = ranges.pop() {
        let start = segments[first].location;
        let end = segments[second].location;

        let mut farthest = None;
        let mut max_distance = tolerance;
        for index in (first + 1)..second {
            let distance =
                perpendicular_distance(&segments[index].location, &start, &end, precision);
            if distance > max_distance {
                max_distance = distance;
                farthest = Some(index);
            }
        }

        if let Some(index) = farthest {
            segments[index].necessary = true;
            if index - first > 1 {
                ranges.push((first, index));
            }
            if second - index > 1 {
                ranges.push((index, second));
            }
        }
    }

    debug!(
        necessary = segments.iter().filter(|segment| segment.necessary).count(),
        total = segments.len(),
        tolerance,
        "simplified route geometry"
    );

    segments
}

/// Distance in meters from `point` to the chord between `start` and `end`.
fn perpendicular_distance(
    point: &GeoPoint,
    start: &GeoPoint,
    end: &GeoPoint,
    precision: CoordinatePrecision,
) -> f64 {
    let origin_lat = start.lat_degrees(precision).to_radians();
    let project = |p: &GeoPoint| -> (f64, f64) {
        let x = (p.lon_degrees(precision) - start.lon_degrees(precision)).to_radians()
            * origin_lat.cos()
            * EARTH_RADIUS_METERS;
        let y = (p.lat_degrees(precision) - start.lat_degrees(precision)).to_radians()
            * EARTH_RADIUS_METERS;
        (x, y)
    };

    let (px, py) = project(point);
    let (ex, ey) = project(end);

    let length_sq = ex * ex + ey * ey;
    if length_sq == 0.0 {
        return (px * px + py * py).sqrt();
    }

    let ratio = ((px * ex + py * ey) / length_sq).clamp(0.0, 1.0);
    let dx = px - ratio * ex;
    let dy = py - ratio * ey;
    (dx * dx + dy * dy).sqrt()
}
