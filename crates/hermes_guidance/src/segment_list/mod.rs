//! Turns the raw path of a route into a list of travel segments.

mod builder;
mod finalize;

use tracing::{debug, warn};

use crate::{
    data_facade::DataFacade,
    error::GuidanceError,
    geopoint::CoordinatePrecision,
    raw_route::{NameId, RawRoute},
    segment::TravelSegment,
};

use builder::SegmentBuilder;
use finalize::{FinalizeParams, finalize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathSelection {
    Primary,
    Alternative,
}

/// The finalized segments of one path of a route.
#[derive(Debug, Default)]
pub struct SegmentList {
    segments: Vec<TravelSegment>,
    via_indices: Vec<u32>,
    /// Meters.
    total_distance: u32,
    /// Seconds.
    total_duration: u32,
    start_name_id: NameId,
    end_name_id: NameId,
}

impl SegmentList {
    pub fn new<F: DataFacade>(
        raw_route: &RawRoute,
        selection: PathSelection,
        zoom_level: u8,
        precision: CoordinatePrecision,
        facade: &F,
    ) -> Result<SegmentList, GuidanceError> {
        if !raw_route.is_valid() {
            debug!("no valid path, describing an empty route");
            return Ok(SegmentList::default());
        }

        let (Some(first_leg), Some(last_leg)) = (raw_route.legs.first(), raw_route.legs.last())
        else {
            return Err(GuidanceError::MissingEndpoint);
        };

        let source_traversed_in_reverse = match (selection, &raw_route.alternative) {
            (PathSelection::Alternative, Some(alternative)) => {
                alternative.source_traversed_in_reverse
            }
            _ => first_leg.source_traversed_in_reverse,
        };

        let mut builder = SegmentBuilder::new();
        builder.init_route(&first_leg.source, source_traversed_in_reverse);

        let reported_weight = match (selection, &raw_route.alternative) {
            (PathSelection::Alternative, Some(alternative)) => {
                builder.add_leg(
                    &alternative.steps,
                    &last_leg.target,
                    alternative.target_traversed_in_reverse,
                    false,
                    facade,
                )?;
                alternative.total_weight
            }
            (PathSelection::Alternative, None) => {
                warn!("alternative requested but none was found");
                return Ok(SegmentList::default());
            }
            (PathSelection::Primary, _) => {
                for (index, leg) in raw_route.legs.iter().enumerate() {
                    builder.add_leg(
                        &leg.steps,
                        &leg.target,
                        leg.target_traversed_in_reverse,
                        raw_route.is_via_leg(index),
                        facade,
                    )?;
                }
                raw_route.shortest_path_weight
            }
        };

        let finalized = finalize(
            builder.build(),
            FinalizeParams {
                reported_weight,
                start_name_id: first_leg.source.name_id,
                end_name_id: last_leg.target.name_id,
                zoom_level,
                precision,
            },
        )?;

        Ok(SegmentList {
            segments: finalized.segments,
            via_indices: finalized.via_indices,
            total_distance: finalized.total_distance,
            total_duration: finalized.total_duration,
            start_name_id: finalized.start_name_id,
            end_name_id: finalized.end_name_id,
        })
    }

    pub fn segments(&self) -> &[TravelSegment] {
        &self.segments
    }

    pub fn via_indices(&self) -> &[u32] {
        &self.via_indices
    }

    pub fn total_distance(&self) -> u32 {
        self.total_distance
    }

    pub fn total_duration(&self) -> u32 {
        self.total_duration
    }

    pub fn start_name_id(&self) -> NameId {
        self.start_name_id
    }

    pub fn end_name_id(&self) -> NameId {
        self.end_name_id
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The points kept for display, in route order.
    pub fn necessary_segments(&self) -> impl Iterator<Item = &TravelSegment> {
        self.segments.iter().filter(|segment| segment.necessary)
    }
}
