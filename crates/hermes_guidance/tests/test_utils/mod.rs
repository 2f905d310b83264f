#![allow(dead_code)]

use hermes_guidance::{
    InMemoryFacade,
    geopoint::GeoPoint,
    raw_route::{EndpointNode, NameId, NodeId, RawStep, RouteLeg},
    travel_mode::TravelMode,
    turn_instruction::TurnInstruction,
};

/// Grid spacing in fixed-point units, roughly 111 meters.
pub const SPACING: i32 = 1_000;

pub const UNNAMED: NameId = 0;
pub const MAIN_ST: NameId = 1;
pub const OAK_AVE: NameId = 2;
pub const ELM_RD: NameId = 3;
pub const RING: NameId = 4;

//
//  Node ids of a 4x4 grid:
//
//  lat
//  ^
//  |  12  13  14  15
//  |   8   9  10  11
//  |   4   5   6   7
//  |   0   1   2   3
//  +-----------------> lon
//
pub fn create_grid_facade(rows: usize, cols: usize) -> InMemoryFacade {
    let mut facade = InMemoryFacade::new();
    for name in ["", "Main St", "Oak Ave", "Elm Rd", "Ring"] {
        facade.add_name(name);
    }

    for row in 0..rows {
        for col in 0..cols {
            facade.add_node(
                (row * cols + col) as NodeId,
                GeoPoint::new(row as i32 * SPACING, col as i32 * SPACING),
            );
        }
    }

    facade
}

pub fn node_id(row: usize, col: usize, cols: usize) -> NodeId {
    (row * cols + col) as NodeId
}

pub fn endpoint(row: usize, col: usize, name_id: NameId) -> EndpointNode {
    EndpointNode {
        location: GeoPoint::new(row as i32 * SPACING, col as i32 * SPACING),
        name_id,
        forward_weight: 0,
        reverse_weight: 0,
        forward_travel_mode: TravelMode::Driving,
        backward_travel_mode: TravelMode::Driving,
    }
}

pub fn step(node: NodeId, name_id: NameId, turn_instruction: TurnInstruction) -> RawStep {
    RawStep {
        node,
        name_id,
        turn_instruction,
        weight: 100,
        travel_mode: TravelMode::Driving,
    }
}

pub fn create_leg(source: EndpointNode, steps: Vec<RawStep>, target: EndpointNode) -> RouteLeg {
    RouteLeg {
        source,
        target,
        steps,
        source_traversed_in_reverse: false,
        target_traversed_in_reverse: false,
    }
}

/// Weight of a leg as the search would report it.
pub fn leg_weight(leg: &RouteLeg) -> u32 {
    leg.steps.iter().map(|step| step.weight).sum()
}
