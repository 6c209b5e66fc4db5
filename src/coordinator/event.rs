use crate::entities::{Coordinate, LocationFix, Route};
use crate::error::Error;

#[derive(Clone, Debug, PartialEq)]
pub enum LocationEvent {
    Connected,
    LocationChanged(LocationFix),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// host came to the foreground
    Start,
    /// host went to the background
    Stop,
    Destroy,
}

/// Everything the coordinator reacts to, delivered one at a time over its channel.
#[derive(Clone, Debug)]
pub enum Event {
    PermissionResult { granted: bool },
    Location(LocationEvent),
    RouteResult {
        generation: u64,
        result: Result<Route, Error>,
    },
    UserTap(Coordinate),
    StartClicked,
    Lifecycle(Lifecycle),
}
