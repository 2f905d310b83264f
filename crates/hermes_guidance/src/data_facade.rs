use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    geopoint::GeoPoint,
    raw_route::{NameId, NodeId},
};

/// Read-only access to the routing data the description pipeline needs.
pub trait DataFacade {
    fn coordinate_of(&self, node: NodeId) -> Option<GeoPoint>;

    /// Unknown identifiers resolve to the empty name.
    fn name_for(&self, name_id: NameId) -> &str;
}

/// A facade over coordinates and names held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryFacade {
    #[serde(default)]
    coordinates: FxHashMap<NodeId, GeoPoint>,
    #[serde(default)]
    names: Vec<String>,
}

impl InMemoryFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: NodeId, location: GeoPoint) {
        self.coordinates.insert(node, location);
    }

    pub fn add_name(&mut self, name: impl Into<String>) -> NameId {
        self.names.push(name.into());
        (self.names.len() - 1) as NameId
    }

    /// Returns the id of `name`, registering it when it is not known yet.
    pub fn name_id(&mut self, name: &str) -> NameId {
        match self.names.iter().position(|existing| existing == name) {
            Some(index) => index as NameId,
            None => self.add_name(name),
        }
    }

    pub fn node_count(&self) -> usize {
        self.coordinates.len()
    }
}

impl DataFacade for InMemoryFacade {
    fn coordinate_of(&self, node: NodeId) -> Option<GeoPoint> {
        self.coordinates.get(&node).copied()
    }

    fn name_for(&self, name_id: NameId) -> &str {
        self.names
            .get(name_id as usize)
            .map(String::as_str)
            .unwrap_or("")
    }
}
