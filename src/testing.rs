//! Recording fakes for the collaborator traits.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use geo_types::LineString;
use uuid::Uuid;

use crate::api::{
    ActionSurface, DirectionsService, LocationEngine, LocationEngineProvider, LocationPriority,
    MapSurface, MarkerId, NavigationLauncher, OverlayId, PermissionPrompt, RenderMode,
};
use crate::entities::{Coordinate, LocationFix, Route, RouteLeg, RouteRequest};
use crate::error::Error;
use crate::location::LocationListener;
use crate::navigation::NavigationOptions;

pub fn sample_route(request: RouteRequest) -> Route {
    let geometry = LineString::from(vec![
        (request.origin.longitude, request.origin.latitude),
        (request.destination.longitude, request.destination.latitude),
    ]);

    Route::new(
        request,
        2875.4,
        512.0,
        geometry,
        vec![RouteLeg {
            summary: "Market Street".into(),
            distance: 2875.4,
            duration: 512.0,
        }],
    )
}

pub struct FakePrompt {
    granted: bool,
    answer: bool,
    requests: AtomicUsize,
}

impl FakePrompt {
    pub fn already_granted() -> Arc<Self> {
        Arc::new(Self {
            granted: true,
            answer: true,
            requests: AtomicUsize::new(0),
        })
    }

    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            granted: false,
            answer,
            requests: AtomicUsize::new(0),
        })
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionPrompt for FakePrompt {
    fn are_location_permissions_granted(&self) -> bool {
        self.granted
    }

    async fn request_location_permissions(&self) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    SetPriority(LocationPriority),
    Activate,
    AddListener,
    RemoveListener,
    RequestUpdates,
    RemoveUpdates,
    Deactivate,
}

#[derive(Debug, Default)]
pub struct EngineLog {
    pub engines_obtained: usize,
    pub calls: Vec<EngineCall>,
    pub listener: Option<LocationListener>,
}

pub struct FakeEngineProvider {
    last: Option<LocationFix>,
    log: Arc<Mutex<EngineLog>>,
}

impl FakeEngineProvider {
    pub fn new(last: Option<LocationFix>) -> Self {
        Self {
            last,
            log: Arc::new(Mutex::new(EngineLog::default())),
        }
    }

    pub fn log(&self) -> Arc<Mutex<EngineLog>> {
        self.log.clone()
    }
}

impl LocationEngineProvider for FakeEngineProvider {
    fn obtain_best_location_engine(&self) -> Box<dyn LocationEngine> {
        self.log.lock().unwrap().engines_obtained += 1;

        Box::new(FakeEngine {
            last: self.last.clone(),
            log: self.log.clone(),
        })
    }
}

struct FakeEngine {
    last: Option<LocationFix>,
    log: Arc<Mutex<EngineLog>>,
}

impl FakeEngine {
    fn record(&self, call: EngineCall) {
        self.log.lock().unwrap().calls.push(call);
    }
}

impl LocationEngine for FakeEngine {
    fn set_priority(&mut self, priority: LocationPriority) {
        self.record(EngineCall::SetPriority(priority));
    }

    fn activate(&mut self) {
        self.record(EngineCall::Activate);
    }

    fn last_location(&self) -> Option<LocationFix> {
        self.last.clone()
    }

    fn add_listener(&mut self, listener: LocationListener) {
        self.record(EngineCall::AddListener);
        self.log.lock().unwrap().listener = Some(listener);
    }

    fn remove_listener(&mut self) {
        self.record(EngineCall::RemoveListener);
        self.log.lock().unwrap().listener = None;
    }

    fn request_location_updates(&mut self) {
        self.record(EngineCall::RequestUpdates);
    }

    fn remove_location_updates(&mut self) {
        self.record(EngineCall::RemoveUpdates);
    }

    fn deactivate(&mut self) {
        self.record(EngineCall::Deactivate);
    }
}

type Reply = Result<Option<Vec<Route>>, Error>;

/// Answers requests from a script; once the script runs out, requests never resolve.
pub struct ScriptedDirections {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl ScriptedDirections {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(vec![]),
        })
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectionsService for ScriptedDirections {
    async fn get_route(&self, request: RouteRequest) -> Result<Option<Vec<Route>>, Error> {
        self.requests.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some(reply) => reply,
            None => futures::future::pending().await,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MapCall {
    AnimateCamera(Coordinate, f64),
    AddMarker(Coordinate),
    RemoveMarker,
    AddRoute(Uuid),
    RemoveRoute(Uuid),
    EnableLocationLayer(RenderMode),
    LocationLayerActive(bool),
}

#[derive(Debug, Default)]
pub struct MapLog {
    pub calls: Vec<MapCall>,
    pub markers: Vec<(MarkerId, Coordinate)>,
    pub overlays: Vec<(OverlayId, Uuid)>,
}

impl MapLog {
    /// Tokens of the routes currently drawn.
    pub fn drawn_routes(&self) -> Vec<Uuid> {
        self.overlays.iter().map(|(_, token)| *token).collect()
    }

    pub fn count(&self, matches: impl Fn(&MapCall) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(*call)).count()
    }
}

#[derive(Default)]
pub struct RecordingMap {
    log: Arc<Mutex<MapLog>>,
}

impl RecordingMap {
    pub fn log(&self) -> Arc<Mutex<MapLog>> {
        self.log.clone()
    }
}

impl MapSurface for RecordingMap {
    fn animate_camera(&mut self, target: Coordinate, zoom: f64) {
        self.log
            .lock()
            .unwrap()
            .calls
            .push(MapCall::AnimateCamera(target, zoom));
    }

    fn add_marker(&mut self, position: Coordinate) -> MarkerId {
        let marker = MarkerId::new();
        let mut log = self.log.lock().unwrap();
        log.calls.push(MapCall::AddMarker(position));
        log.markers.push((marker, position));
        marker
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        let mut log = self.log.lock().unwrap();
        log.calls.push(MapCall::RemoveMarker);
        log.markers.retain(|(id, _)| *id != marker);
    }

    fn add_route(&mut self, route: &Route) -> OverlayId {
        let overlay = OverlayId::new();
        let mut log = self.log.lock().unwrap();
        log.calls.push(MapCall::AddRoute(route.token));
        log.overlays.push((overlay, route.token));
        overlay
    }

    fn remove_route(&mut self, overlay: OverlayId) {
        let mut log = self.log.lock().unwrap();
        if let Some(index) = log.overlays.iter().position(|(id, _)| *id == overlay) {
            let (_, token) = log.overlays.remove(index);
            log.calls.push(MapCall::RemoveRoute(token));
        }
    }

    fn enable_location_layer(&mut self, mode: RenderMode) {
        self.log
            .lock()
            .unwrap()
            .calls
            .push(MapCall::EnableLocationLayer(mode));
    }

    fn set_location_layer_active(&mut self, active: bool) {
        self.log
            .lock()
            .unwrap()
            .calls
            .push(MapCall::LocationLayerActive(active));
    }
}

#[derive(Default)]
pub struct RecordingControls {
    pub states: Arc<Mutex<Vec<bool>>>,
}

impl ActionSurface for RecordingControls {
    fn set_start_enabled(&mut self, enabled: bool) {
        self.states.lock().unwrap().push(enabled);
    }
}

#[derive(Default)]
pub struct RecordingLauncher {
    pub launches: Arc<Mutex<Vec<NavigationOptions>>>,
}

impl NavigationLauncher for RecordingLauncher {
    fn start_navigation(&mut self, options: NavigationOptions) {
        self.launches.lock().unwrap().push(options);
    }
}
