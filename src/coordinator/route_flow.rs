use std::mem;

use super::{Coordinator, State};

use crate::{
    config::StartPolicy,
    entities::{Coordinate, Route, RouteRequest},
    error::Error,
};

impl Coordinator {
    #[tracing::instrument(skip(self))]
    pub(super) fn on_user_tap(&mut self, destination: Coordinate) -> Result<(), Error> {
        let (origin, mut scene) = match mem::replace(&mut self.state, State::Terminated) {
            State::Ready { origin, scene, .. }
            | State::Planning { origin, scene, .. }
            | State::RouteAvailable { origin, scene, .. } => (origin, scene),
            other => {
                self.state = other;
                tracing::warn!("destination ignored, no origin yet");
                return Ok(());
            }
        };

        if let Some(marker) = scene.marker.take() {
            self.map.remove_marker(marker);
        }
        scene.marker = Some(self.map.add_marker(destination));

        let generation = self.planner.plan(RouteRequest {
            origin: origin.coordinate,
            destination,
        });

        // any previous overlay stays until the new route replaces it
        self.state = State::Planning {
            origin,
            destination,
            generation,
            scene,
        };

        match self.config.start_policy {
            StartPolicy::OnTap => self.set_start_enabled(true),
            StartPolicy::OnRoute => self.set_start_enabled(false),
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, result))]
    pub(super) fn on_route_result(
        &mut self,
        generation: u64,
        result: Result<Route, Error>,
    ) -> Result<(), Error> {
        if !self.planner.is_current(generation) {
            tracing::debug!(
                latest = self.planner.generation(),
                "discarding superseded route result"
            );
            return Ok(());
        }

        let pending = mem::replace(&mut self.state, State::Terminated);

        let (origin, destination, mut scene) = match pending {
            State::Planning {
                origin,
                destination,
                generation: issued,
                scene,
            } if issued == generation => (origin, destination, scene),
            other => {
                self.state = other;
                tracing::debug!("no request pending for this result");
                return Ok(());
            }
        };

        let route = match result {
            Ok(route) => route,
            Err(err) => {
                // overlay and start control stay as they were
                tracing::error!(code = err.code, "route planning failed: {}", err.message);
                self.state = State::Ready {
                    origin,
                    destination: Some(destination),
                    scene,
                };
                return Ok(());
            }
        };

        if let Some(overlay) = scene.overlay.take() {
            self.map.remove_route(overlay);
        }
        scene.overlay = Some(self.map.add_route(&route));

        tracing::info!(
            distance = route.distance,
            duration = route.duration,
            "route available"
        );

        self.state = State::RouteAvailable {
            origin,
            destination,
            route,
            scene,
        };

        if let StartPolicy::OnRoute = self.config.start_policy {
            self.set_start_enabled(true);
        }

        Ok(())
    }
}
