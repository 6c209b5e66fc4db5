//! Stand-in collaborators for running the coordinator without a device:
//! a jittery location engine, an auto-answering permission prompt, and map,
//! control and launcher surfaces that only log.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rand_distr::{Distribution, Normal};
use tokio::task::JoinHandle;

use crate::api::{
    ActionSurface, LocationEngine, LocationEngineProvider, LocationPriority, MapSurface, MarkerId,
    NavigationLauncher, OverlayId, PermissionPrompt, RenderMode,
};
use crate::entities::{Coordinate, LocationFix, Route};
use crate::location::LocationListener;
use crate::navigation::NavigationOptions;

// roughly five meters
const JITTER_DEGREES: f64 = 0.00005;

pub struct SimulatedPermissionPrompt {
    pub answer: bool,
    pub delay: Duration,
}

#[async_trait]
impl PermissionPrompt for SimulatedPermissionPrompt {
    fn are_location_permissions_granted(&self) -> bool {
        false
    }

    async fn request_location_permissions(&self) -> bool {
        tracing::info!("showing location permission prompt");
        tokio::time::sleep(self.delay).await;
        self.answer
    }
}

pub struct SimulatedLocationProvider {
    pub origin: Coordinate,
    pub interval: Duration,
}

impl LocationEngineProvider for SimulatedLocationProvider {
    fn obtain_best_location_engine(&self) -> Box<dyn LocationEngine> {
        Box::new(SimulatedLocationEngine {
            origin: self.origin,
            interval: self.interval,
            shared: Arc::new(Mutex::new(Shared::default())),
            task: None,
        })
    }
}

#[derive(Default)]
struct Shared {
    listener: Option<LocationListener>,
    connected: bool,
    streaming: bool,
}

struct SimulatedLocationEngine {
    origin: Coordinate,
    interval: Duration,
    shared: Arc<Mutex<Shared>>,
    task: Option<JoinHandle<()>>,
}

fn jittered(origin: Coordinate, jitter: &Normal<f64>) -> LocationFix {
    let mut rng = rand::thread_rng();

    let coordinate = Coordinate {
        latitude: origin.latitude + jitter.sample(&mut rng),
        longitude: origin.longitude + jitter.sample(&mut rng),
    };

    LocationFix::new(coordinate, Some(5.0))
}

impl SimulatedLocationEngine {
    fn with_shared(&self, f: impl FnOnce(&mut Shared)) {
        match self.shared.lock() {
            Ok(mut shared) => f(&mut shared),
            Err(_) => tracing::warn!("simulated engine state poisoned"),
        }
    }
}

impl LocationEngine for SimulatedLocationEngine {
    fn set_priority(&mut self, priority: LocationPriority) {
        tracing::debug!("simulated engine priority {:?}", priority);
    }

    fn activate(&mut self) {
        if self.task.is_some() {
            return;
        }

        let origin = self.origin;
        let interval = self.interval;
        let shared = self.shared.clone();

        self.task = Some(tokio::spawn(async move {
            let jitter = match Normal::new(0.0, JITTER_DEGREES) {
                Ok(jitter) => jitter,
                Err(err) => {
                    tracing::warn!("simulated engine disabled: {}", err);
                    return;
                }
            };

            loop {
                tokio::time::sleep(interval).await;

                let (listener, announce, streaming) = match shared.lock() {
                    Ok(mut shared) => {
                        let announce = shared.listener.is_some() && !shared.connected;
                        if announce {
                            shared.connected = true;
                        }
                        (shared.listener.clone(), announce, shared.streaming)
                    }
                    Err(_) => return,
                };

                if let Some(listener) = listener {
                    if announce {
                        listener.on_connected();
                    } else if streaming {
                        listener.on_location_changed(jittered(origin, &jitter));
                    }
                }
            }
        }));
    }

    fn last_location(&self) -> Option<LocationFix> {
        None
    }

    fn add_listener(&mut self, listener: LocationListener) {
        self.with_shared(|shared| shared.listener = Some(listener));
    }

    fn remove_listener(&mut self) {
        self.with_shared(|shared| shared.listener = None);
    }

    fn request_location_updates(&mut self) {
        self.with_shared(|shared| shared.streaming = true);
    }

    fn remove_location_updates(&mut self) {
        self.with_shared(|shared| shared.streaming = false);
    }

    fn deactivate(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[derive(Default)]
pub struct TracingMap;

impl MapSurface for TracingMap {
    fn animate_camera(&mut self, target: Coordinate, zoom: f64) {
        tracing::info!(?target, zoom, "map: animate camera");
    }

    fn add_marker(&mut self, position: Coordinate) -> MarkerId {
        let marker = MarkerId::new();
        tracing::info!(?position, marker = %marker.0, "map: add marker");
        marker
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        tracing::info!(marker = %marker.0, "map: remove marker");
    }

    fn add_route(&mut self, route: &Route) -> OverlayId {
        let overlay = OverlayId::new();
        tracing::info!(
            route = %route.token,
            points = route.geometry.0.len(),
            overlay = %overlay.0,
            "map: add route"
        );
        overlay
    }

    fn remove_route(&mut self, overlay: OverlayId) {
        tracing::info!(overlay = %overlay.0, "map: remove route");
    }

    fn enable_location_layer(&mut self, mode: RenderMode) {
        tracing::info!(?mode, "map: location layer enabled");
    }

    fn set_location_layer_active(&mut self, active: bool) {
        tracing::info!(active, "map: location layer");
    }
}

#[derive(Default)]
pub struct TracingControls;

impl ActionSurface for TracingControls {
    fn set_start_enabled(&mut self, enabled: bool) {
        tracing::info!(enabled, "controls: start button");
    }
}

#[derive(Default)]
pub struct TracingLauncher;

impl NavigationLauncher for TracingLauncher {
    fn start_navigation(&mut self, options: NavigationOptions) {
        tracing::info!(
            route = %options.route.token,
            distance = options.route.distance,
            simulate = options.simulate_route,
            "navigation: launched"
        );
    }
}
