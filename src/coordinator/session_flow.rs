use super::{Coordinator, Lifecycle, State};

use crate::{
    error::{permission_denied_error, Error},
    permission::PermissionStatus,
};

impl Coordinator {
    /// Kicks off the session by consulting the permission gate.
    pub fn start(&mut self) {
        if let State::AwaitingPermission = self.state {
            self.request_permission();
        }
    }

    fn request_permission(&mut self) {
        match self.gate.check_and_request() {
            PermissionStatus::Granted => self.enable_location(),
            PermissionStatus::PendingUserDecision => {
                tracing::info!("waiting for location permission")
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub(super) fn on_permission_result(&mut self, granted: bool) -> Result<(), Error> {
        self.gate.resolve();

        if !matches!(self.state, State::AwaitingPermission) {
            tracing::warn!("permission result outside of startup ignored");
            return Ok(());
        }

        if granted {
            self.enable_location();
            return Ok(());
        }

        tracing::error!("location permission denied, ending session");
        self.teardown();

        Err(permission_denied_error())
    }

    #[tracing::instrument(skip(self))]
    pub(super) fn on_lifecycle(&mut self, lifecycle: Lifecycle) -> Result<(), Error> {
        match lifecycle {
            Lifecycle::Start => {
                self.foreground = true;

                if self.location.is_active() {
                    self.location.request_continuous_updates();
                }

                if self.location_layer {
                    self.map.set_location_layer_active(true);
                }

                if let State::AwaitingPermission = self.state {
                    self.request_permission();
                }
            }
            Lifecycle::Stop => {
                self.foreground = false;
                self.location.stop_updates();

                if self.location_layer {
                    self.map.set_location_layer_active(false);
                }
            }
            Lifecycle::Destroy => self.teardown(),
        }

        Ok(())
    }

    pub(super) fn teardown(&mut self) {
        self.planner.shutdown();
        self.location.deactivate();
        self.state = State::Terminated;
    }
}
