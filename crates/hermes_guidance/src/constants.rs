use crate::weighting::Weight;

pub(crate) const INVALID_WEIGHT: Weight = u32::MAX;

/// Lengths below this are treated as zero when folding degenerate route ends.
pub(crate) const NEAR_ZERO_LENGTH: f64 = f32::EPSILON as f64;

pub(crate) const MAX_ZOOM_LEVEL: u8 = 18;
pub(crate) const DEFAULT_ZOOM_LEVEL: u8 = MAX_ZOOM_LEVEL;

pub(crate) const POLYLINE_PRECISION: u32 = 5;
