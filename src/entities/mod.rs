mod coordinate;
mod fix;
mod route;

pub use coordinate::Coordinate;
pub use fix::LocationFix;
pub use route::{Route, RouteLeg, RouteRequest, RouteSummary};
