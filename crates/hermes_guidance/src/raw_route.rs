//! The unpacked result of the shortest-path search, as consumed by the
//! route description pipeline.

use serde::{Deserialize, Serialize};

use crate::{
    constants::INVALID_WEIGHT,
    geopoint::GeoPoint,
    travel_mode::TravelMode,
    turn_instruction::TurnInstruction,
    weighting::{Weight, is_valid_weight},
};

pub type NodeId = u32;
pub type NameId = u32;

/// One unpacked edge of the path: the node it reaches and how it is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawStep {
    pub node: NodeId,
    pub name_id: NameId,
    pub turn_instruction: TurnInstruction,
    pub weight: Weight,
    #[serde(default)]
    pub travel_mode: TravelMode,
}

/// A query location snapped onto the network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndpointNode {
    pub location: GeoPoint,
    pub name_id: NameId,
    pub forward_weight: Weight,
    pub reverse_weight: Weight,
    #[serde(default)]
    pub forward_travel_mode: TravelMode,
    #[serde(default)]
    pub backward_travel_mode: TravelMode,
}

impl EndpointNode {
    pub fn weight(&self, traversed_in_reverse: bool) -> Weight {
        if traversed_in_reverse {
            self.reverse_weight
        } else {
            self.forward_weight
        }
    }

    pub fn travel_mode(&self, traversed_in_reverse: bool) -> TravelMode {
        if traversed_in_reverse {
            self.backward_travel_mode
        } else {
            self.forward_travel_mode
        }
    }
}

/// The path between two consecutive requested stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub source: EndpointNode,
    pub target: EndpointNode,
    #[serde(default)]
    pub steps: Vec<RawStep>,
    #[serde(default)]
    pub source_traversed_in_reverse: bool,
    #[serde(default)]
    pub target_traversed_in_reverse: bool,
}

/// A competing path from the first source to the last target, without vias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativePath {
    #[serde(default)]
    pub steps: Vec<RawStep>,
    pub total_weight: Weight,
    #[serde(default)]
    pub source_traversed_in_reverse: bool,
    #[serde(default)]
    pub target_traversed_in_reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRoute {
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
    #[serde(default = "invalid_weight")]
    pub shortest_path_weight: Weight,
    #[serde(default)]
    pub alternative: Option<AlternativePath>,
}

fn invalid_weight() -> Weight {
    INVALID_WEIGHT
}

impl RawRoute {
    pub fn new(legs: Vec<RouteLeg>, shortest_path_weight: Weight) -> Self {
        RawRoute {
            legs,
            shortest_path_weight,
            alternative: None,
        }
    }

    /// A route for which the search found no path.
    pub fn invalid(legs: Vec<RouteLeg>) -> Self {
        RawRoute::new(legs, INVALID_WEIGHT)
    }

    pub fn with_alternative(mut self, alternative: AlternativePath) -> Self {
        self.alternative = Some(alternative);
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.legs.is_empty() && is_valid_weight(self.shortest_path_weight)
    }

    pub fn has_alternative(&self) -> bool {
        self.alternative
            .as_ref()
            .is_some_and(|alternative| is_valid_weight(alternative.total_weight))
    }

    /// Every leg but the last one ends at a requested intermediate stop.
    pub fn is_via_leg(&self, leg_index: usize) -> bool {
        leg_index + 1 < self.legs.len()
    }

    pub fn source(&self) -> Option<&EndpointNode> {
        self.legs.first().map(|leg| &leg.source)
    }

    pub fn target(&self) -> Option<&EndpointNode> {
        self.legs.last().map(|leg| &leg.target)
    }
}
