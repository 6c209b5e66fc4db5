//! Interfaces of the collaborators the coordinator drives. Map rendering,
//! the location engine, the directions backend and the turn-by-turn UI all
//! sit behind these traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinate, LocationFix, Route, RouteRequest};
use crate::error::Error;
use crate::location::LocationListener;
use crate::navigation::NavigationOptions;

#[async_trait]
pub trait PermissionPrompt: Send + Sync {
    fn are_location_permissions_granted(&self) -> bool;

    /// Shows the platform dialog and resolves with the user's answer.
    async fn request_location_permissions(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationPriority {
    HighAccuracy,
    BalancedPowerAccuracy,
    LowPower,
}

pub trait LocationEngine: Send {
    fn set_priority(&mut self, priority: LocationPriority);
    fn activate(&mut self);
    fn last_location(&self) -> Option<LocationFix>;
    fn add_listener(&mut self, listener: LocationListener);
    fn remove_listener(&mut self);
    fn request_location_updates(&mut self);
    fn remove_location_updates(&mut self);
    fn deactivate(&mut self);
}

pub trait LocationEngineProvider: Send {
    fn obtain_best_location_engine(&self) -> Box<dyn LocationEngine>;
}

#[async_trait]
pub trait DirectionsService: Send + Sync {
    /// `Ok(None)` means the service answered without a body.
    async fn get_route(&self, request: RouteRequest) -> Result<Option<Vec<Route>>, Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayId(pub Uuid);

impl MarkerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl OverlayId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Normal,
    Compass,
    Gps,
}

pub trait MapSurface: Send {
    fn animate_camera(&mut self, target: Coordinate, zoom: f64);
    fn add_marker(&mut self, position: Coordinate) -> MarkerId;
    fn remove_marker(&mut self, marker: MarkerId);
    fn add_route(&mut self, route: &Route) -> OverlayId;
    fn remove_route(&mut self, overlay: OverlayId);
    fn enable_location_layer(&mut self, mode: RenderMode);
    fn set_location_layer_active(&mut self, active: bool);
}

/// The on-screen "start navigation" control.
pub trait ActionSurface: Send {
    fn set_start_enabled(&mut self, enabled: bool);
}

pub trait NavigationLauncher: Send {
    fn start_navigation(&mut self, options: NavigationOptions);
}
