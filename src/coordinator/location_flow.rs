use super::{Coordinator, LocationEvent, Scene, State};

use crate::{api::RenderMode, entities::LocationFix, error::Error, location::LocationListener};

impl Coordinator {
    /// Activates the source and establishes the origin, from the last known
    /// fix when there is one, otherwise from the first streamed fix.
    pub(super) fn enable_location(&mut self) {
        self.location.activate();

        self.map.enable_location_layer(RenderMode::Compass);
        self.location_layer = true;

        self.state = State::AwaitingOrigin;

        match self.location.last_known_fix() {
            Some(fix) => self.accept_origin(fix),
            None => {
                tracing::info!("no last known fix, waiting for location updates");
                self.location.subscribe(LocationListener::new(self.sender.clone()));
            }
        }
    }

    pub(super) fn on_location_event(&mut self, event: LocationEvent) -> Result<(), Error> {
        match event {
            LocationEvent::Connected => {
                self.location.on_connected();

                if self.foreground {
                    self.location.request_continuous_updates();
                }
            }
            LocationEvent::LocationChanged(fix) => {
                let fix = match self.location.accept_fix(fix) {
                    Some(fix) => fix,
                    None => return Ok(()),
                };

                if let State::AwaitingOrigin = self.state {
                    self.accept_origin(fix);
                }

                // only the first fix matters, later moves are not re-planned
                self.location.unsubscribe();
            }
        }

        Ok(())
    }

    fn accept_origin(&mut self, fix: LocationFix) {
        tracing::info!(
            latitude = fix.coordinate.latitude,
            longitude = fix.coordinate.longitude,
            "origin established"
        );

        self.map.animate_camera(fix.coordinate, self.config.camera_zoom);

        self.state = State::Ready {
            origin: fix,
            destination: None,
            scene: Scene::default(),
        };
    }
}
