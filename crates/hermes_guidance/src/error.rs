use thiserror::Error;

use crate::raw_route::NodeId;

#[derive(Error, Debug)]
pub enum GuidanceError {
    #[error("Unknown turn instruction code {0}")]
    UnknownTurnInstruction(u8),
    #[error("Unknown travel mode code {0}")]
    UnknownTravelMode(u8),
    #[error("No coordinate for node {0}")]
    UnknownNode(NodeId),
    #[error("Via indices must hold at least two entries, found {len}")]
    InvalidViaIndices { len: usize },
    #[error("Necessary segment at position {position} has no bearing")]
    MissingBearing { position: u32 },
    #[error("Route has no endpoint to describe")]
    MissingEndpoint,
    #[error("Failed to encode location hint")]
    HintEncoding(#[from] bincode::error::EncodeError),
    #[error("Failed to encode geometry: {0}")]
    GeometryEncoding(String),
}
