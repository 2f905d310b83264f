use fxhash::FxHashSet;
use serde::Serialize;
use tracing::debug;

use crate::{
    data_facade::DataFacade, raw_route::NameId, segment::TravelSegment,
    turn_instruction::TurnInstruction,
};

/// A guidance point reduced to what is needed to name a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedSegment {
    pub name_id: NameId,
    /// Meters.
    pub length: u32,
    pub position: usize,
}

/// Keeps the announced maneuvers of a finalized path, roundabout entries
/// excluded.
pub fn build_named_segments(segments: &[TravelSegment]) -> Vec<NamedSegment> {
    let mut named = Vec::new();
    for segment in segments {
        if segment.is_guidance_point()
            && segment.turn_instruction != TurnInstruction::EnterRoundAbout
        {
            named.push(NamedSegment {
                name_id: segment.name_id,
                length: segment.length.rounded(),
                position: named.len(),
            });
        }
    }
    named
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteNames {
    pub primary: [String; 2],
    pub alternative: [String; 2],
    /// False when both paths ended up with the same pair of names.
    pub distinguishable: bool,
}

pub fn extract_route_names<F: DataFacade>(
    primary: &[NamedSegment],
    alternative: &[NamedSegment],
    facade: &F,
) -> RouteNames {
    let primary_by_length = names_by_length(primary, facade);
    let mut primary_names = best_pair(&primary_by_length);

    if alternative.is_empty() {
        return RouteNames {
            primary: primary_names,
            alternative: Default::default(),
            distinguishable: true,
        };
    }

    let alternative_by_length = names_by_length(alternative, facade);
    let mut alternative_names = best_pair(&alternative_by_length);

    if same_names(&primary_names, &alternative_names) {
        debug!("route names collide with the alternative, looking for unique names");

        if let Some(name) = longest_unique_name(&primary_by_length, &alternative_by_length) {
            primary_names[1] = name.to_string();
        }
        if let Some(name) = longest_unique_name(&alternative_by_length, &primary_by_length) {
            alternative_names[1] = name.to_string();
        }
    }

    let distinguishable = !same_names(&primary_names, &alternative_names);
    RouteNames {
        primary: primary_names,
        alternative: alternative_names,
        distinguishable,
    }
}

/// Non-empty names with their segment length, longest first. Ties keep route
/// order.
fn names_by_length<'a, F: DataFacade>(
    segments: &[NamedSegment],
    facade: &'a F,
) -> Vec<(&'a str, u32)> {
    let mut names: Vec<(usize, &'a str, u32)> = segments
        .iter()
        .map(|segment| {
            (
                segment.position,
                facade.name_for(segment.name_id),
                segment.length,
            )
        })
        .filter(|(_, name, _)| !name.is_empty())
        .collect();

    names.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    names
        .into_iter()
        .map(|(_, name, length)| (name, length))
        .collect()
}

fn best_pair(names_by_length: &[(&str, u32)]) -> [String; 2] {
    let mut pair: [String; 2] = Default::default();
    let mut filled = 0;

    for (name, _) in names_by_length {
        if filled == 2 {
            break;
        }
        if filled == 1 && pair[0] == *name {
            continue;
        }
        pair[filled] = name.to_string();
        filled += 1;
    }

    pair
}

fn same_names(a: &[String; 2], b: &[String; 2]) -> bool {
    (a[0] == b[0] && a[1] == b[1]) || (a[0] == b[1] && a[1] == b[0])
}

fn longest_unique_name<'a>(
    names: &[(&'a str, u32)],
    other: &[(&str, u32)],
) -> Option<&'a str> {
    let other: FxHashSet<&str> = other.iter().map(|(name, _)| *name).collect();
    names
        .iter()
        .find(|(name, _)| !other.contains(name))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data_facade::InMemoryFacade, geopoint::GeoPoint, meters::Meters,
        travel_mode::TravelMode,
    };

    fn facade() -> InMemoryFacade {
        let mut facade = InMemoryFacade::new();
        facade.add_name(""); // 0
        facade.add_name("Main St"); // 1
        facade.add_name("Oak Ave"); // 2
        facade.add_name("Elm Rd"); // 3
        facade.add_name("Pine Way"); // 4
        facade
    }

    fn named(segments: &[(NameId, u32)]) -> Vec<NamedSegment> {
        segments
            .iter()
            .enumerate()
            .map(|(position, &(name_id, length))| NamedSegment {
                name_id,
                length,
                position,
            })
            .collect()
    }

    #[test]
    fn test_longest_distinct_names() {
        let primary = named(&[(1, 100), (2, 50), (1, 30)]);

        let names = extract_route_names(&primary, &[], &facade());
        assert_eq!(names.primary, ["Main St".to_string(), "Oak Ave".to_string()]);
        assert_eq!(names.alternative, [String::new(), String::new()]);
        assert!(names.distinguishable);
    }

    #[test]
    fn test_single_name_leaves_second_slot_empty() {
        let primary = named(&[(1, 100), (1, 30), (0, 500)]);

        let names = extract_route_names(&primary, &[], &facade());
        assert_eq!(names.primary, ["Main St".to_string(), String::new()]);
    }

    #[test]
    fn test_ties_keep_route_order() {
        let primary = named(&[(3, 40), (2, 40), (1, 10)]);

        let names = extract_route_names(&primary, &[], &facade());
        assert_eq!(names.primary, ["Elm Rd".to_string(), "Oak Ave".to_string()]);
    }

    #[test]
    fn test_alternative_with_other_names() {
        let primary = named(&[(1, 100), (2, 50)]);
        let alternative = named(&[(3, 80), (4, 70)]);

        let names = extract_route_names(&primary, &alternative, &facade());
        assert_eq!(names.primary, ["Main St".to_string(), "Oak Ave".to_string()]);
        assert_eq!(
            names.alternative,
            ["Elm Rd".to_string(), "Pine Way".to_string()]
        );
        assert!(names.distinguishable);
    }

    #[test]
    fn test_colliding_names_use_unique_streets() {
        let primary = named(&[(1, 100), (2, 50), (3, 20)]);
        let alternative = named(&[(2, 90), (1, 60), (4, 10)]);

        let names = extract_route_names(&primary, &alternative, &facade());
        assert_eq!(names.primary, ["Main St".to_string(), "Elm Rd".to_string()]);
        assert_eq!(
            names.alternative,
            ["Oak Ave".to_string(), "Pine Way".to_string()]
        );
        assert!(names.distinguishable);
    }

    #[test]
    fn test_identical_paths_are_not_distinguishable() {
        let primary = named(&[(1, 100), (2, 50)]);
        let alternative = named(&[(1, 90), (2, 60)]);

        let names = extract_route_names(&primary, &alternative, &facade());
        assert_eq!(names.primary, names.alternative);
        assert!(!names.distinguishable);
    }

    #[test]
    fn test_build_named_segments_skips_roundabout_entries() {
        let segment = |turn_instruction, necessary| {
            let mut segment = TravelSegment::new(
                GeoPoint::new(0, 0),
                1,
                10,
                turn_instruction,
                TravelMode::Driving,
            );
            segment.length = Meters::new(12.4);
            segment.necessary = necessary;
            segment
        };

        let segments = vec![
            segment(TurnInstruction::HeadOn, true),
            segment(TurnInstruction::NoTurn, false),
            segment(TurnInstruction::EnterRoundAbout, true),
            segment(TurnInstruction::StayOnRoundAbout, true),
            segment(TurnInstruction::LeaveRoundAbout, true),
            segment(TurnInstruction::TurnLeft, false),
        ];

        let named = build_named_segments(&segments);
        assert_eq!(named.len(), 2);
        assert_eq!(named[0].length, 12);
        assert_eq!(named[1].position, 1);
    }
}
