use crate::{
    geopoint::GeoPoint,
    meters::Meters,
    raw_route::NameId,
    travel_mode::TravelMode,
    turn_instruction::TurnInstruction,
    weighting::Weight,
};

/// A point of the described route together with the travel that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelSegment {
    pub location: GeoPoint,
    /// Name of the road departed on from this point once the list is finalized.
    pub name_id: NameId,
    pub length: Meters,
    /// Tenths of a second.
    pub duration: Weight,
    pub turn_instruction: TurnInstruction,
    pub necessary: bool,
    pub is_via_location: bool,
    /// Tenths of a degree.
    pub pre_turn_bearing: Option<u16>,
    /// Tenths of a degree.
    pub post_turn_bearing: Option<u16>,
    pub travel_mode: TravelMode,
}

impl TravelSegment {
    pub fn new(
        location: GeoPoint,
        name_id: NameId,
        duration: Weight,
        turn_instruction: TurnInstruction,
        travel_mode: TravelMode,
    ) -> Self {
        TravelSegment {
            location,
            name_id,
            length: Meters::ZERO,
            duration,
            turn_instruction,
            necessary: turn_instruction.is_turn(),
            is_via_location: false,
            pre_turn_bearing: None,
            post_turn_bearing: None,
            travel_mode,
        }
    }

    /// Whether this point produces an instruction row.
    pub fn is_guidance_point(&self) -> bool {
        self.necessary && self.turn_instruction.is_necessary()
    }
}
