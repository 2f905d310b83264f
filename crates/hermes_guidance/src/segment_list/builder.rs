use tracing::trace;

use crate::{
    data_facade::DataFacade,
    error::GuidanceError,
    geopoint::GeoPoint,
    raw_route::{EndpointNode, NameId, RawStep},
    segment::TravelSegment,
    travel_mode::TravelMode,
    turn_instruction::TurnInstruction,
    weighting::Weight,
};

/// The part of a raw step that is recorded on a segment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PathPoint {
    pub name_id: NameId,
    pub turn_instruction: TurnInstruction,
    pub weight: Weight,
    pub travel_mode: TravelMode,
}

impl From<&RawStep> for PathPoint {
    fn from(step: &RawStep) -> Self {
        PathPoint {
            name_id: step.name_id,
            turn_instruction: step.turn_instruction,
            weight: step.weight,
            travel_mode: step.travel_mode,
        }
    }
}

/// Collects the raw path into travel segments, one per reached point.
#[derive(Default)]
pub(crate) struct SegmentBuilder {
    segments: Vec<TravelSegment>,
}

impl SegmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_route(&mut self, source: &EndpointNode, traversed_in_reverse: bool) {
        self.append(
            source.location,
            PathPoint {
                name_id: source.name_id,
                turn_instruction: TurnInstruction::HeadOn,
                weight: source.weight(traversed_in_reverse),
                travel_mode: source.travel_mode(traversed_in_reverse),
            },
        );
    }

    pub fn add_leg<F: DataFacade>(
        &mut self,
        steps: &[RawStep],
        target: &EndpointNode,
        traversed_in_reverse: bool,
        is_via_leg: bool,
        facade: &F,
    ) -> Result<(), GuidanceError> {
        for step in steps {
            let location = facade
                .coordinate_of(step.node)
                .ok_or(GuidanceError::UnknownNode(step.node))?;
            self.append(location, PathPoint::from(step));
        }

        let target_point = PathPoint {
            name_id: target.name_id,
            turn_instruction: if is_via_leg {
                TurnInstruction::ReachViaLocation
            } else {
                TurnInstruction::NoTurn
            },
            weight: target.weight(traversed_in_reverse),
            travel_mode: target.travel_mode(traversed_in_reverse),
        };

        // A via stop always needs its own point, even on top of the start.
        let appended = if is_via_leg {
            self.push(target.location, target_point);
            true
        } else {
            self.append(target.location, target_point)
        };

        if appended {
            if let Some(last) = self.segments.last_mut() {
                last.necessary = true;
                last.is_via_location = is_via_leg;
            }
        }

        Ok(())
    }

    /// Appends a point, returning whether a new segment was created.
    ///
    /// While the route is still at its first point, a move onto that very
    /// point only updates the name and mode of the existing segment.
    pub fn append(&mut self, location: GeoPoint, point: PathPoint) -> bool {
        if let [only] = self.segments.as_mut_slice() {
            if only.location == location {
                if point.weight > 0 {
                    only.name_id = point.name_id;
                    only.travel_mode = point.travel_mode;
                }
                trace!(?location, "merged zero-length move into route start");
                return false;
            }
        }

        self.push(location, point);
        true
    }

    fn push(&mut self, location: GeoPoint, point: PathPoint) {
        let turn_instruction = match self.segments.last() {
            Some(previous) => announce_mode_change(&point, previous.travel_mode),
            None => point.turn_instruction,
        };

        self.segments.push(TravelSegment::new(
            location,
            point.name_id,
            point.weight,
            turn_instruction,
            point.travel_mode,
        ));
    }

    pub fn build(self) -> Vec<TravelSegment> {
        self.segments
    }
}

/// Mode changes are announced even when the path search reports no turn.
fn announce_mode_change(point: &PathPoint, previous_mode: TravelMode) -> TurnInstruction {
    if point.turn_instruction == TurnInstruction::NoTurn
        && point.travel_mode != previous_mode
        && point.weight > 0
    {
        TurnInstruction::GoStraight
    } else {
        point.turn_instruction
    }
}
