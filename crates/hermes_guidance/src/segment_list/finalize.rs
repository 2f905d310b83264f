use tracing::{debug, trace};

use crate::{
    douglas_peucker,
    error::GuidanceError,
    geopoint::CoordinatePrecision,
    meters::Meters,
    raw_route::NameId,
    segment::TravelSegment,
    turn_instruction::TurnInstruction,
    weighting::{Weight, weight_to_seconds},
};

pub(crate) struct FinalizeParams {
    /// Travel time of the selected path as reported by the search.
    pub reported_weight: Weight,
    pub start_name_id: NameId,
    pub end_name_id: NameId,
    pub zoom_level: u8,
    pub precision: CoordinatePrecision,
}

#[derive(Debug)]
pub(crate) struct Finalized {
    pub segments: Vec<TravelSegment>,
    pub via_indices: Vec<u32>,
    pub total_distance: u32,
    pub total_duration: u32,
    pub start_name_id: NameId,
    pub end_name_id: NameId,
}

pub(crate) fn finalize(
    segments: Vec<TravelSegment>,
    params: FinalizeParams,
) -> Result<Finalized, GuidanceError> {
    let (mut segments, step_lengths) = shift_names_and_measure(segments, params.precision);
    let path_length = aggregate_runs(&mut segments, &step_lengths);

    let mut start_name_id = params.start_name_id;
    let mut end_name_id = params.end_name_id;

    let last_step_length = step_lengths.last().copied().unwrap_or(Meters::ZERO);
    if let Some(name_id) = trim_degenerate_tail(&mut segments, last_step_length) {
        end_name_id = name_id;
    }
    if let Some(name_id) = trim_degenerate_head(&mut segments) {
        start_name_id = name_id;
    }

    let mut segments = douglas_peucker::simplify(segments, params.zoom_level, params.precision);
    let via_indices = mark_bearings(&mut segments, params.precision)?;

    Ok(Finalized {
        segments,
        via_indices,
        total_distance: path_length.rounded(),
        total_duration: weight_to_seconds(params.reported_weight),
        start_name_id,
        end_name_id,
    })
}

/// Moves every name one point back, so that a point carries the name of the
/// road it is left on, and measures the step arriving at every point.
fn shift_names_and_measure(
    mut segments: Vec<TravelSegment>,
    precision: CoordinatePrecision,
) -> (Vec<TravelSegment>, Vec<Meters>) {
    let mut step_lengths = vec![Meters::ZERO; segments.len()];

    if let Some(first) = segments.first_mut() {
        first.length = Meters::ZERO;
    }

    for i in 1..segments.len() {
        segments[i - 1].name_id = segments[i].name_id;
        let length = segments[i - 1]
            .location
            .haversine_distance(&segments[i].location, precision);
        segments[i].length = length;
        step_lengths[i] = length;
    }

    (segments, step_lengths)
}

/// Folds the steps between two turns onto the point that starts the run.
/// Points inside a run end up with zero length and duration.
///
/// Returns the length of the whole path.
fn aggregate_runs(segments: &mut [TravelSegment], step_lengths: &[Meters]) -> Meters {
    let mut run_start = 0;
    let mut run_length = Meters::ZERO;
    let mut run_duration: Weight = 0;
    let mut path_length = Meters::ZERO;

    for i in 1..segments.len() {
        path_length += step_lengths[i];
        run_length += step_lengths[i];
        run_duration += segments[i].duration;

        segments[run_start].length = run_length;
        segments[run_start].duration = run_duration;

        segments[i].length = Meters::ZERO;
        segments[i].duration = 0;

        if segments[i].turn_instruction.is_turn() {
            debug_assert!(segments[i].necessary);
            run_start = i;
            run_length = Meters::ZERO;
            run_duration = 0;
        }
    }

    path_length
}

/// Drops a final point that adds no distance. Returns the new end name.
fn trim_degenerate_tail(
    segments: &mut Vec<TravelSegment>,
    last_step_length: Meters,
) -> Option<NameId> {
    let len = segments.len();
    if len <= 2 || !last_step_length.is_near_zero() || segments[len - 2].is_via_location {
        return None;
    }

    let end_name_id = segments[len - 2].name_id;
    segments.pop();

    let last = segments.last_mut()?;
    last.necessary = true;
    last.turn_instruction = TurnInstruction::NoTurn;

    trace!(end_name_id, "dropped zero-length route end");
    Some(end_name_id)
}

/// Drops a first point whose run adds no distance. Returns the new start name.
fn trim_degenerate_head(segments: &mut Vec<TravelSegment>) -> Option<NameId> {
    if segments.len() <= 2 || !segments[0].length.is_near_zero() || segments[1].is_via_location {
        return None;
    }

    segments.remove(0);

    let first = segments.first_mut()?;
    first.turn_instruction = TurnInstruction::HeadOn;
    first.necessary = true;

    trace!(start_name_id = first.name_id, "dropped zero-length route start");
    Some(first.name_id)
}

/// Computes the bearings of every necessary point and the positions at which
/// legs end. Positions count necessary points only.
fn mark_bearings(
    segments: &mut [TravelSegment],
    precision: CoordinatePrecision,
) -> Result<Vec<u32>, GuidanceError> {
    let mut via_indices = vec![0];
    let mut necessary_segments: u32 = 0;

    for i in 0..segments.len() {
        if !segments[i].necessary {
            continue;
        }

        if segments[i].is_via_location {
            via_indices.push(necessary_segments);
        }

        let (post_turn_bearing, pre_turn_bearing) = match segments.get(i + 1) {
            Some(next) => {
                let current = &segments[i].location;
                (
                    current.bearing(&next.location, precision),
                    next.location.bearing(current, precision),
                )
            }
            None => (0.0, 0.0),
        };

        segments[i].post_turn_bearing = Some(to_tenths(post_turn_bearing));
        segments[i].pre_turn_bearing = Some(to_tenths(pre_turn_bearing));

        necessary_segments += 1;
    }

    via_indices.push(necessary_segments.saturating_sub(1));

    debug!(
        "necessary segments: {} of {}",
        necessary_segments,
        segments.len()
    );

    if via_indices.len() < 2 {
        return Err(GuidanceError::InvalidViaIndices {
            len: via_indices.len(),
        });
    }

    Ok(via_indices)
}

fn to_tenths(bearing: f64) -> u16 {
    ((bearing * 10.0).round() as u16) % 3600
}
