use std::sync::Arc;

use async_channel::Sender;

use crate::api::PermissionPrompt;
use crate::coordinator::Event;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    PendingUserDecision,
}

/// Gates startup on location access. At most one prompt is outstanding; its
/// answer comes back to the coordinator as `Event::PermissionResult`.
pub struct PermissionGate {
    prompt: Arc<dyn PermissionPrompt>,
    events: Sender<Event>,
    pending: bool,
}

impl PermissionGate {
    pub fn new(prompt: Arc<dyn PermissionPrompt>, events: Sender<Event>) -> Self {
        Self {
            prompt,
            events,
            pending: false,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn check_and_request(&mut self) -> PermissionStatus {
        if self.prompt.are_location_permissions_granted() {
            return PermissionStatus::Granted;
        }

        if self.pending {
            tracing::debug!("permission prompt already pending");
            return PermissionStatus::PendingUserDecision;
        }

        self.pending = true;

        let prompt = self.prompt.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let granted = prompt.request_location_permissions().await;

            if events
                .send(Event::PermissionResult { granted })
                .await
                .is_err()
            {
                tracing::warn!("permission result dropped, coordinator is gone");
            }
        });

        PermissionStatus::PendingUserDecision
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Called when the prompt's answer has been delivered.
    pub fn resolve(&mut self) {
        self.pending = false;
    }
}
