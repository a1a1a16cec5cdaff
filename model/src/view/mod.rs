//! Pure transformations from a loaded stop into what the map and charts draw. Equal inputs
//! always produce equal outputs, so callers can cache on their inputs.

mod colors;
mod heatmap;
mod markers;
mod ranking;
mod route_types;
mod viewport;

pub use self::colors::{route_type_color, travel_time_color, DEFAULT_ROUTE_TYPE_COLOR, NEUTRAL};
pub use self::heatmap::{Heatmap, HeatmapRow};
pub use self::markers::{markers, Marker, MAX_TRAVEL_TIME_SECONDS};
pub use self::ranking::Ranking;
pub use self::route_types::{route_type_shares, RouteTypeShare};
pub use self::viewport::{region, Viewport};
