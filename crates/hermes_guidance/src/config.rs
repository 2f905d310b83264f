use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ZOOM_LEVEL, MAX_ZOOM_LEVEL};

/// What a route description should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorConfig {
    pub instructions: bool,
    pub geometry: bool,
    /// Polyline instead of a coordinate list.
    pub encode_geometry: bool,
    /// Simplification resolution, 0 to 18. Read through `zoom_level()`.
    pub zoom_level: u8,
}

impl DescriptorConfig {
    pub fn with_zoom_level(mut self, zoom_level: u8) -> Self {
        self.zoom_level = zoom_level.min(MAX_ZOOM_LEVEL);
        self
    }

    pub fn zoom_level(&self) -> u8 {
        self.zoom_level.min(MAX_ZOOM_LEVEL)
    }
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        DescriptorConfig {
            instructions: true,
            geometry: true,
            encode_geometry: true,
            zoom_level: DEFAULT_ZOOM_LEVEL,
        }
    }
}
