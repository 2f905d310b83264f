use serde::Serialize;
use tracing::{Level, debug, instrument, warn};

use crate::{
    annotation::{RouteInstruction, annotate_route},
    config::DescriptorConfig,
    data_facade::DataFacade,
    error::GuidanceError,
    geopoint::CoordinatePrecision,
    hint::{BincodeHintEncoder, HintData, HintEncoder, build_hint_data},
    polyline::{RouteGeometry, route_geometry},
    raw_route::RawRoute,
    route_names::{build_named_segments, extract_route_names},
    segment_list::{PathSelection, SegmentList},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Meters.
    pub total_distance: u32,
    /// Seconds.
    pub total_time: u32,
    pub start_point: String,
    pub end_point: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub route_summary: RouteSummary,
    pub via_points: Vec<[f64; 2]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub via_indices: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_geometry: Option<RouteGeometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_instructions: Option<Vec<RouteInstruction>>,
    pub route_name: [String; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_summaries: Option<Vec<RouteSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_indices: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_geometries: Option<Vec<RouteGeometry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_instructions: Option<Vec<Vec<RouteInstruction>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_names: Option<Vec<[String; 2]>>,
    /// False when the alternative could not be told apart from the primary
    /// path by its names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_distinguishable: Option<bool>,
    pub found_alternative: bool,
    pub hint_data: HintData,
}

/// Turns a raw path search result into the response sent to clients.
pub struct ApiResponseGenerator<'a, F: DataFacade, H: HintEncoder = BincodeHintEncoder> {
    facade: &'a F,
    hint_encoder: H,
    precision: CoordinatePrecision,
}

impl<'a, F: DataFacade> ApiResponseGenerator<'a, F> {
    pub fn new(facade: &'a F) -> Self {
        ApiResponseGenerator::with_hint_encoder(facade, BincodeHintEncoder::default())
    }
}

impl<'a, F: DataFacade, H: HintEncoder> ApiResponseGenerator<'a, F, H> {
    pub fn with_hint_encoder(facade: &'a F, hint_encoder: H) -> Self {
        ApiResponseGenerator {
            facade,
            hint_encoder,
            precision: CoordinatePrecision::default(),
        }
    }

    pub fn with_precision(mut self, precision: CoordinatePrecision) -> Self {
        self.precision = precision;
        self
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(legs = raw_route.legs.len()))]
    pub fn describe_route(
        &self,
        config: &DescriptorConfig,
        raw_route: &RawRoute,
    ) -> Result<RouteResponse, GuidanceError> {
        let zoom_level = config.zoom_level();
        let segment_list = SegmentList::new(
            raw_route,
            PathSelection::Primary,
            zoom_level,
            self.precision,
            self.facade,
        )?;

        let described = !segment_list.is_empty();
        let geometry = if config.geometry && described {
            Some(route_geometry(
                segment_list.segments(),
                config.encode_geometry,
                self.precision,
            )?)
        } else {
            None
        };
        let route_instructions = if config.instructions && described {
            Some(annotate_route(segment_list.segments(), self.facade)?)
        } else {
            None
        };

        let mut response = RouteResponse {
            route_summary: self.summarize_route(raw_route, &segment_list),
            via_points: self.list_via_points(raw_route),
            via_indices: segment_list.via_indices().to_vec(),
            route_geometry: geometry,
            route_instructions,
            route_name: Default::default(),
            alternative_summaries: None,
            alternative_indices: None,
            alternative_geometries: None,
            alternative_instructions: None,
            alternative_names: None,
            alternative_distinguishable: None,
            found_alternative: false,
            hint_data: build_hint_data(raw_route, &self.hint_encoder)?,
        };

        let primary_names = build_named_segments(segment_list.segments());

        if raw_route.is_valid() && raw_route.has_alternative() {
            let alternative_list = SegmentList::new(
                raw_route,
                PathSelection::Alternative,
                zoom_level,
                self.precision,
                self.facade,
            )?;

            response.alternative_summaries =
                Some(vec![self.summarize_route(raw_route, &alternative_list)]);
            response.alternative_indices = Some(alternative_list.via_indices().to_vec());
            if config.geometry {
                response.alternative_geometries = Some(vec![route_geometry(
                    alternative_list.segments(),
                    config.encode_geometry,
                    self.precision,
                )?]);
            }
            if config.instructions {
                response.alternative_instructions = Some(vec![annotate_route(
                    alternative_list.segments(),
                    self.facade,
                )?]);
            }

            let alternative_names = build_named_segments(alternative_list.segments());
            let names = extract_route_names(&primary_names, &alternative_names, self.facade);
            if !names.distinguishable {
                debug!("alternative shares its names with the primary path");
            }

            response.route_name = names.primary;
            response.alternative_names = Some(vec![names.alternative]);
            response.alternative_distinguishable = Some(names.distinguishable);
            response.found_alternative = true;
        } else {
            if raw_route.is_valid() && raw_route.alternative.is_some() {
                warn!("alternative path present but without a valid weight, skipping it");
            }
            response.route_name = extract_route_names(&primary_names, &[], self.facade).primary;
        }

        Ok(response)
    }

    /// Totals and endpoint names. Names come from the described path when
    /// there is one, otherwise from the snapped endpoints.
    pub fn summarize_route(&self, raw_route: &RawRoute, segment_list: &SegmentList) -> RouteSummary {
        let (start_name_id, end_name_id) = if segment_list.is_empty() {
            match (raw_route.source(), raw_route.target()) {
                (Some(source), Some(target)) => (Some(source.name_id), Some(target.name_id)),
                _ => (None, None),
            }
        } else {
            (
                Some(segment_list.start_name_id()),
                Some(segment_list.end_name_id()),
            )
        };

        let name = |name_id: Option<u32>| {
            name_id
                .map(|name_id| self.facade.name_for(name_id).to_string())
                .unwrap_or_default()
        };

        RouteSummary {
            total_distance: segment_list.total_distance(),
            total_time: segment_list.total_duration(),
            start_point: name(start_name_id),
            end_point: name(end_name_id),
        }
    }

    /// First source then every leg target, as `[lat, lon]` in degrees.
    pub fn list_via_points(&self, raw_route: &RawRoute) -> Vec<[f64; 2]> {
        let Some(source) = raw_route.source() else {
            return Vec::new();
        };

        std::iter::once(source)
            .chain(raw_route.legs.iter().map(|leg| &leg.target))
            .map(|endpoint| {
                [
                    endpoint.location.lat_degrees(self.precision),
                    endpoint.location.lon_degrees(self.precision),
                ]
            })
            .collect()
    }
}
