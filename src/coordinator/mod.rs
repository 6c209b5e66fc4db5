mod event;
mod location_flow;
mod navigation_flow;
mod route_flow;
mod session_flow;
mod state;

pub use event::{Event, Lifecycle, LocationEvent};
pub use state::{Phase, Scene, SessionSnapshot, State};

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use tokio::sync::watch;

use crate::{
    api::{
        ActionSurface, DirectionsService, LocationEngineProvider, MapSurface, NavigationLauncher,
        PermissionPrompt,
    },
    config::SessionConfig,
    error::{channel_closed_error, Error},
    location::LocationSource,
    permission::PermissionGate,
    planner::RoutePlanner,
};

pub struct Collaborators {
    pub prompt: Arc<dyn PermissionPrompt>,
    pub locations: Box<dyn LocationEngineProvider>,
    pub directions: Arc<dyn DirectionsService>,
    pub map: Box<dyn MapSurface>,
    pub controls: Box<dyn ActionSurface>,
    pub launcher: Box<dyn NavigationLauncher>,
}

/// Single-threaded owner of the session: consumes events one at a time and
/// is the only writer of the route, marker and overlay state.
pub struct Coordinator {
    config: SessionConfig,
    gate: PermissionGate,
    location: LocationSource,
    planner: RoutePlanner,
    map: Box<dyn MapSurface>,
    controls: Box<dyn ActionSurface>,
    launcher: Box<dyn NavigationLauncher>,
    state: State,
    start_enabled: bool,
    foreground: bool,
    location_layer: bool,
    sender: Sender<Event>,
    receiver: Receiver<Event>,
    snapshots: watch::Sender<SessionSnapshot>,
}

/// Cloneable entry point for hosts: posts events and reads the latest snapshot.
#[derive(Clone, Debug)]
pub struct CoordinatorHandle {
    events: Sender<Event>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl CoordinatorHandle {
    pub async fn send(&self, event: Event) -> Result<(), Error> {
        self.events.send(event).await?;

        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }
}

#[cfg(test)]
impl CoordinatorHandle {
    /// A handle with no coordinator behind it, frozen at `snapshot`. Sent
    /// events pile up in the returned receiver.
    pub(crate) fn detached(snapshot: SessionSnapshot) -> (Self, Receiver<Event>) {
        let (events, receiver) = async_channel::unbounded();
        let (_, snapshots) = watch::channel(snapshot);

        (Self { events, snapshots }, receiver)
    }
}

impl Coordinator {
    pub fn new(config: SessionConfig, collaborators: Collaborators) -> Self {
        let (sender, receiver) = async_channel::unbounded();
        let state = State::AwaitingPermission;
        let (snapshots, _) = watch::channel(SessionSnapshot::new(&state, false));

        Self {
            config,
            gate: PermissionGate::new(collaborators.prompt, sender.clone()),
            location: LocationSource::new(collaborators.locations),
            planner: RoutePlanner::new(collaborators.directions, sender.clone()),
            map: collaborators.map,
            controls: collaborators.controls,
            launcher: collaborators.launcher,
            state,
            start_enabled: false,
            foreground: true,
            location_layer: false,
            sender,
            receiver,
            snapshots,
        }
    }

    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle {
            events: self.sender.clone(),
            snapshots: self.snapshots.subscribe(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_start_enabled(&self) -> bool {
        self.start_enabled
    }

    /// Waits for the next event and processes it.
    pub async fn step(&mut self) -> Result<(), Error> {
        let event = self
            .receiver
            .recv()
            .await
            .map_err(|_| channel_closed_error())?;

        self.handle_event(event)
    }

    pub fn handle_event(&mut self, event: Event) -> Result<(), Error> {
        if let State::Terminated = self.state {
            tracing::debug!("session terminated, event ignored");
            return Ok(());
        }

        let result = match event {
            Event::PermissionResult { granted } => self.on_permission_result(granted),
            Event::Location(event) => self.on_location_event(event),
            Event::RouteResult { generation, result } => self.on_route_result(generation, result),
            Event::UserTap(destination) => self.on_user_tap(destination),
            Event::StartClicked => self.on_start_clicked(),
            Event::Lifecycle(lifecycle) => self.on_lifecycle(lifecycle),
        };

        self.publish();

        result
    }

    #[tracing::instrument(name = "Coordinator::run", skip_all)]
    pub async fn run(mut self) {
        self.start();
        self.publish();

        while !matches!(self.state, State::Terminated) {
            if let Err(err) = self.step().await {
                if err == channel_closed_error() {
                    break;
                }

                tracing::warn!("event failed: {}", err);
            }
        }

        self.teardown();
        self.publish();

        tracing::info!("session ended");
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        self.start_enabled = enabled;
        self.controls.set_start_enabled(enabled);
    }

    fn publish(&self) {
        self.snapshots
            .send_replace(SessionSnapshot::new(&self.state, self.start_enabled));
    }
}
