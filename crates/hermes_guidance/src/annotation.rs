//! Turn-by-turn instructions for a finalized segment list.

use serde::{Serialize, ser::SerializeTuple};
use tracing::trace;

use crate::{
    bearing::compass_direction,
    data_facade::DataFacade,
    error::GuidanceError,
    raw_route::NameId,
    segment::TravelSegment,
    travel_mode::TravelMode,
    turn_instruction::TurnInstruction,
    weighting::weight_to_seconds,
};

/// One announced maneuver.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInstruction {
    pub turn_instruction: TurnInstruction,
    /// Set for roundabouts: the exit to take, starting at one.
    pub exit_number: Option<u32>,
    pub street_name: String,
    /// Meters.
    pub length: u32,
    /// Position of the maneuver among the necessary points.
    pub position: u32,
    /// Seconds.
    pub duration: u32,
    pub length_text: String,
    pub post_turn_direction: &'static str,
    pub post_turn_bearing: u32,
    pub pre_turn_direction: &'static str,
    pub pre_turn_bearing: u32,
    /// Not reported on the arrival row.
    pub travel_mode: Option<TravelMode>,
}

impl RouteInstruction {
    /// Wire code, e.g. `"3"` or `"11-2"` for the second roundabout exit.
    pub fn instruction_code(&self) -> String {
        match self.exit_number {
            Some(exit) => format!("{}-{}", self.turn_instruction.code(), exit),
            None => self.turn_instruction.code().to_string(),
        }
    }

    fn arrival(position: u32) -> Self {
        RouteInstruction {
            turn_instruction: TurnInstruction::ReachedYourDestination,
            exit_number: None,
            street_name: String::new(),
            length: 0,
            position,
            duration: 0,
            length_text: String::from("0m"),
            post_turn_direction: compass_direction(0.0),
            post_turn_bearing: 0,
            pre_turn_direction: compass_direction(0.0),
            pre_turn_bearing: 0,
            travel_mode: None,
        }
    }
}

impl Serialize for RouteInstruction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.travel_mode.is_some() { 11 } else { 10 };
        let mut row = serializer.serialize_tuple(len)?;
        row.serialize_element(&self.instruction_code())?;
        row.serialize_element(&self.street_name)?;
        row.serialize_element(&self.length)?;
        row.serialize_element(&self.position)?;
        row.serialize_element(&self.duration)?;
        row.serialize_element(&self.length_text)?;
        row.serialize_element(self.post_turn_direction)?;
        row.serialize_element(&self.post_turn_bearing)?;
        if let Some(travel_mode) = &self.travel_mode {
            row.serialize_element(travel_mode)?;
        }
        row.serialize_element(self.pre_turn_direction)?;
        row.serialize_element(&self.pre_turn_bearing)?;
        row.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RoundaboutState {
    Outside,
    InRoundabout {
        entry_position: u32,
        name_id: NameId,
        exit_count: u32,
    },
}

pub fn annotate_route<F: DataFacade>(
    segments: &[TravelSegment],
    facade: &F,
) -> Result<Vec<RouteInstruction>, GuidanceError> {
    let mut instructions = Vec::new();
    let mut roundabout = RoundaboutState::Outside;
    let mut running_index: u32 = 0;

    for segment in segments {
        match segment.turn_instruction {
            TurnInstruction::EnterRoundAbout if segment.necessary => {
                roundabout = RoundaboutState::InRoundabout {
                    entry_position: running_index,
                    name_id: segment.name_id,
                    exit_count: 0,
                };
            }
            TurnInstruction::StayOnRoundAbout => {
                roundabout = match roundabout {
                    RoundaboutState::InRoundabout {
                        entry_position,
                        name_id,
                        exit_count,
                    } => RoundaboutState::InRoundabout {
                        entry_position,
                        name_id,
                        exit_count: exit_count + 1,
                    },
                    RoundaboutState::Outside => RoundaboutState::InRoundabout {
                        entry_position: running_index,
                        name_id: segment.name_id,
                        exit_count: 1,
                    },
                };
            }
            TurnInstruction::LeaveRoundAbout if segment.necessary => {
                let exit_count = match roundabout {
                    RoundaboutState::InRoundabout {
                        entry_position,
                        name_id,
                        exit_count,
                    } => {
                        trace!(
                            entry_position,
                            roundabout = facade.name_for(name_id),
                            exit_count,
                            "leaving roundabout"
                        );
                        exit_count
                    }
                    RoundaboutState::Outside => 0,
                };

                let mut instruction = instruction_row(segment, running_index, facade)?;
                instruction.turn_instruction = TurnInstruction::EnterRoundAbout;
                instruction.exit_number = Some(exit_count + 1);
                instructions.push(instruction);

                roundabout = RoundaboutState::Outside;
            }
            _ if segment.is_guidance_point() => {
                instructions.push(instruction_row(segment, running_index, facade)?);
            }
            _ => {}
        }

        if segment.necessary {
            running_index += 1;
        }
    }

    instructions.push(RouteInstruction::arrival(running_index.saturating_sub(1)));

    Ok(instructions)
}

fn instruction_row<F: DataFacade>(
    segment: &TravelSegment,
    position: u32,
    facade: &F,
) -> Result<RouteInstruction, GuidanceError> {
    let (Some(post_turn_bearing), Some(pre_turn_bearing)) =
        (segment.post_turn_bearing, segment.pre_turn_bearing)
    else {
        return Err(GuidanceError::MissingBearing { position });
    };

    let post_turn_bearing = post_turn_bearing as f64 / 10.0;
    let pre_turn_bearing = pre_turn_bearing as f64 / 10.0;

    Ok(RouteInstruction {
        turn_instruction: segment.turn_instruction,
        exit_number: None,
        street_name: facade.name_for(segment.name_id).to_string(),
        length: segment.length.rounded(),
        position,
        duration: weight_to_seconds(segment.duration),
        length_text: format!("{}m", segment.length.truncated()),
        post_turn_direction: compass_direction(post_turn_bearing),
        post_turn_bearing: post_turn_bearing.round() as u32,
        pre_turn_direction: compass_direction(pre_turn_bearing),
        pre_turn_bearing: pre_turn_bearing.round() as u32,
        travel_mode: Some(segment.travel_mode),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data_facade::InMemoryFacade, geopoint::GeoPoint, meters::Meters};

    fn segment(turn_instruction: TurnInstruction, name_id: NameId) -> TravelSegment {
        let mut segment = TravelSegment::new(
            GeoPoint::new(0, 0),
            name_id,
            125,
            turn_instruction,
            TravelMode::Driving,
        );
        segment.length = Meters::new(120.7);
        if segment.necessary {
            segment.post_turn_bearing = Some(900);
            segment.pre_turn_bearing = Some(2700);
        }
        segment
    }

    fn facade() -> InMemoryFacade {
        let mut facade = InMemoryFacade::new();
        facade.add_name("");
        facade.add_name("Main St");
        facade.add_name("Ring");
        facade.add_name("Oak Ave");
        facade
    }

    #[test]
    fn test_instruction_rows() {
        let segments = vec![
            segment(TurnInstruction::HeadOn, 1),
            segment(TurnInstruction::NoTurn, 1),
            segment(TurnInstruction::TurnLeft, 3),
            segment(TurnInstruction::NoTurn, 3),
        ];

        let instructions = annotate_route(&segments, &facade()).unwrap();
        assert_eq!(instructions.len(), 3);

        let head = &instructions[0];
        assert_eq!(head.instruction_code(), "10");
        assert_eq!(head.street_name, "Main St");
        assert_eq!(head.length, 121);
        assert_eq!(head.length_text, "120m");
        assert_eq!(head.duration, 13);
        assert_eq!(head.position, 0);
        assert_eq!(head.post_turn_direction, "E");
        assert_eq!(head.post_turn_bearing, 90);
        assert_eq!(head.pre_turn_direction, "W");
        assert_eq!(head.pre_turn_bearing, 270);

        // The NoTurn point in between was simplified away and does not count
        assert_eq!(instructions[1].instruction_code(), "7");
        assert_eq!(instructions[1].position, 1);
    }

    #[test]
    fn test_roundabout_exit_counting() {
        let segments = vec![
            segment(TurnInstruction::HeadOn, 1),
            segment(TurnInstruction::EnterRoundAbout, 2),
            segment(TurnInstruction::StayOnRoundAbout, 2),
            segment(TurnInstruction::StayOnRoundAbout, 2),
            segment(TurnInstruction::LeaveRoundAbout, 3),
            segment(TurnInstruction::NoTurn, 3),
        ];

        let instructions = annotate_route(&segments, &facade()).unwrap();
        let roundabout_rows: Vec<&RouteInstruction> = instructions
            .iter()
            .filter(|row| row.turn_instruction == TurnInstruction::EnterRoundAbout)
            .collect();

        assert_eq!(roundabout_rows.len(), 1);
        assert_eq!(roundabout_rows[0].exit_number, Some(3));
        assert_eq!(roundabout_rows[0].instruction_code(), "11-3");
        assert_eq!(roundabout_rows[0].street_name, "Oak Ave");
        assert_eq!(instructions.len(), 3);
    }

    #[test]
    fn test_exit_count_resets_after_leaving() {
        let segments = vec![
            segment(TurnInstruction::EnterRoundAbout, 2),
            segment(TurnInstruction::StayOnRoundAbout, 2),
            segment(TurnInstruction::LeaveRoundAbout, 1),
            segment(TurnInstruction::EnterRoundAbout, 2),
            segment(TurnInstruction::LeaveRoundAbout, 3),
        ];

        let instructions = annotate_route(&segments, &facade()).unwrap();
        assert_eq!(instructions[0].instruction_code(), "11-2");
        assert_eq!(instructions[1].instruction_code(), "11-1");
    }

    #[test]
    fn test_arrival_row() {
        let mut last = segment(TurnInstruction::NoTurn, 1);
        last.necessary = true;
        let segments = vec![segment(TurnInstruction::HeadOn, 1), last];

        let instructions = annotate_route(&segments, &facade()).unwrap();
        let arrival = instructions.last().unwrap();

        assert_eq!(arrival.instruction_code(), "15");
        assert_eq!(arrival.street_name, "");
        assert_eq!(arrival.length, 0);
        assert_eq!(arrival.duration, 0);
        assert_eq!(arrival.position, 1);
        assert_eq!(arrival.length_text, "0m");
        assert_eq!(arrival.post_turn_direction, "N");
        assert_eq!(arrival.travel_mode, None);
    }

    #[test]
    fn test_missing_bearing_is_an_error() {
        let mut broken = segment(TurnInstruction::TurnRight, 1);
        broken.post_turn_bearing = None;

        let result = annotate_route(&[segment(TurnInstruction::HeadOn, 1), broken], &facade());
        assert!(matches!(
            result,
            Err(GuidanceError::MissingBearing { position: 1 })
        ));
    }

    #[test]
    fn test_rows_serialize_as_arrays() {
        let segments = vec![segment(TurnInstruction::HeadOn, 1)];
        let instructions = annotate_route(&segments, &facade()).unwrap();

        let json = serde_json::to_value(&instructions).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                ["10", "Main St", 121, 0, 13, "120m", "E", 90, 1, "W", 270],
                ["15", "", 0, 0, 0, "0m", "N", 0, "N", 0]
            ])
        );
    }
}
