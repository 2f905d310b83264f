pub mod annotation;
pub mod bearing;
pub mod config;
mod constants;
pub mod data_facade;
pub mod douglas_peucker;
pub mod error;
pub mod geopoint;
pub mod hint;
pub mod meters;
pub mod polyline;
pub mod raw_route;
pub mod response;
pub mod route_names;
pub mod segment;
pub mod segment_list;
pub mod travel_mode;
pub mod turn_instruction;
pub mod weighting;

pub use config::DescriptorConfig;
pub use data_facade::{DataFacade, InMemoryFacade};
pub use error::GuidanceError;
pub use response::{ApiResponseGenerator, RouteResponse};
