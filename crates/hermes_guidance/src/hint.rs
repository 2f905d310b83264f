//! Opaque per-endpoint hints that let a client skip snapping on a follow-up
//! request.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;

use crate::{
    error::GuidanceError,
    raw_route::{EndpointNode, RawRoute},
};

pub trait HintEncoder {
    /// Identifies the dataset the hints were produced against.
    fn checksum(&self) -> u32;
    fn encode(&self, endpoint: &EndpointNode) -> Result<String, GuidanceError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeHintEncoder {
    checksum: u32,
}

impl BincodeHintEncoder {
    pub fn new(checksum: u32) -> Self {
        BincodeHintEncoder { checksum }
    }
}

impl HintEncoder for BincodeHintEncoder {
    fn checksum(&self) -> u32 {
        self.checksum
    }

    fn encode(&self, endpoint: &EndpointNode) -> Result<String, GuidanceError> {
        let bytes = bincode::serde::encode_to_vec(endpoint, bincode::config::standard())?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HintData {
    pub checksum: u32,
    pub locations: Vec<String>,
}

/// One hint per leg source, then one for the final target.
pub fn build_hint_data<H: HintEncoder>(
    raw_route: &RawRoute,
    encoder: &H,
) -> Result<HintData, GuidanceError> {
    let mut locations = Vec::with_capacity(raw_route.legs.len() + 1);
    for leg in &raw_route.legs {
        locations.push(encoder.encode(&leg.source)?);
    }
    if let Some(target) = raw_route.target() {
        locations.push(encoder.encode(target)?);
    }

    Ok(HintData {
        checksum: encoder.checksum(),
        locations,
    })
}
