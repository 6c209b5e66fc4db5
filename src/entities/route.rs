use geo_types::LineString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub summary: String,
    pub distance: f64,
    pub duration: f64,
}

/// The top-ranked candidate of a directions response, tagged with the
/// request it was planned for.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub token: Uuid,
    pub request: RouteRequest,
    /// meters
    pub distance: f64,
    /// seconds
    pub duration: f64,
    pub geometry: LineString<f64>,
    pub legs: Vec<RouteLeg>,
}

impl Route {
    pub fn new(
        request: RouteRequest,
        distance: f64,
        duration: f64,
        geometry: LineString<f64>,
        legs: Vec<RouteLeg>,
    ) -> Self {
        Self {
            token: Uuid::new_v4(),
            request,
            distance,
            duration,
            geometry,
            legs,
        }
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            token: self.token,
            destination: self.request.destination,
            distance: self.distance,
            duration: self.duration,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub token: Uuid,
    pub destination: Coordinate,
    pub distance: f64,
    pub duration: f64,
}
