use serde::{Deserialize, Serialize};

use crate::api::{MarkerId, OverlayId};
use crate::entities::{Coordinate, LocationFix, Route, RouteSummary};

/// What the coordinator currently has drawn on the map. At most one
/// destination marker and one route overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scene {
    pub marker: Option<MarkerId>,
    pub overlay: Option<OverlayId>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum State {
    AwaitingPermission,
    AwaitingOrigin,
    /// `destination` is the last tapped position whose planning failed; its
    /// marker is still drawn.
    Ready {
        origin: LocationFix,
        destination: Option<Coordinate>,
        scene: Scene,
    },
    Planning {
        origin: LocationFix,
        destination: Coordinate,
        generation: u64,
        scene: Scene,
    },
    RouteAvailable {
        origin: LocationFix,
        destination: Coordinate,
        route: Route,
        scene: Scene,
    },
    Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingPermission,
    AwaitingOrigin,
    Ready,
    Planning,
    RouteAvailable,
    Terminated,
}

impl State {
    pub fn phase(&self) -> Phase {
        match self {
            Self::AwaitingPermission => Phase::AwaitingPermission,
            Self::AwaitingOrigin => Phase::AwaitingOrigin,
            Self::Ready { .. } => Phase::Ready,
            Self::Planning { .. } => Phase::Planning,
            Self::RouteAvailable { .. } => Phase::RouteAvailable,
            Self::Terminated => Phase::Terminated,
        }
    }

    pub fn origin(&self) -> Option<&LocationFix> {
        match self {
            Self::Ready { origin, .. }
            | Self::Planning { origin, .. }
            | Self::RouteAvailable { origin, .. } => Some(origin),
            _ => None,
        }
    }

    pub fn destination(&self) -> Option<Coordinate> {
        match self {
            Self::Ready { destination, .. } => *destination,
            Self::Planning { destination, .. } | Self::RouteAvailable { destination, .. } => {
                Some(*destination)
            }
            _ => None,
        }
    }

    /// The route planned for the currently selected destination, if any.
    /// A route still on screen for an older destination does not count.
    pub fn current_route(&self) -> Option<&Route> {
        match self {
            Self::RouteAvailable { route, .. } => Some(route),
            _ => None,
        }
    }
}

/// Read-only view published after every event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub origin: Option<Coordinate>,
    pub destination: Option<Coordinate>,
    pub route: Option<RouteSummary>,
    pub start_enabled: bool,
    pub navigation_ready: bool,
}

impl SessionSnapshot {
    pub fn new(state: &State, start_enabled: bool) -> Self {
        let route = state.current_route().map(Route::summary);

        Self {
            phase: state.phase(),
            origin: state.origin().map(|fix| fix.coordinate),
            destination: state.destination(),
            navigation_ready: route.is_some(),
            route,
            start_enabled,
        }
    }
}
