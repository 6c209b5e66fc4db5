use async_channel::Sender;

use crate::api::{LocationEngine, LocationEngineProvider, LocationPriority};
use crate::coordinator::{Event, LocationEvent};
use crate::entities::LocationFix;

/// Handed to the engine on subscription; forwards engine callbacks onto the
/// coordinator's channel.
#[derive(Clone, Debug)]
pub struct LocationListener {
    events: Sender<Event>,
}

impl LocationListener {
    pub fn new(events: Sender<Event>) -> Self {
        Self { events }
    }

    pub fn on_connected(&self) {
        self.deliver(LocationEvent::Connected);
    }

    pub fn on_location_changed(&self, fix: LocationFix) {
        self.deliver(LocationEvent::LocationChanged(fix));
    }

    fn deliver(&self, event: LocationEvent) {
        if self.events.try_send(Event::Location(event)).is_err() {
            tracing::debug!("location event dropped, coordinator is gone");
        }
    }
}

/// Owns the location engine resource. `activate`/`deactivate` decide whether
/// the engine exists at all; `request_continuous_updates`/`stop_updates`
/// decide whether it streams.
pub struct LocationSource {
    provider: Box<dyn LocationEngineProvider>,
    engine: Option<Box<dyn LocationEngine>>,
    subscribed: bool,
    connected: bool,
    streaming: bool,
}

impl LocationSource {
    pub fn new(provider: Box<dyn LocationEngineProvider>) -> Self {
        Self {
            provider,
            engine: None,
            subscribed: false,
            connected: false,
            streaming: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    #[tracing::instrument(skip(self))]
    pub fn activate(&mut self) {
        if self.engine.is_some() {
            return;
        }

        let mut engine = self.provider.obtain_best_location_engine();
        engine.set_priority(LocationPriority::HighAccuracy);
        engine.activate();

        tracing::info!("location engine activated");

        self.engine = Some(engine);
    }

    pub fn last_known_fix(&self) -> Option<LocationFix> {
        self.engine.as_ref().and_then(|engine| engine.last_location())
    }

    pub fn subscribe(&mut self, listener: LocationListener) {
        if let Some(engine) = self.engine.as_mut() {
            engine.add_listener(listener);
            self.subscribed = true;
        }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            if self.subscribed {
                engine.remove_listener();
            }
        }

        self.subscribed = false;
    }

    pub fn on_connected(&mut self) {
        if self.engine.is_some() {
            self.connected = true;
        }
    }

    /// Filters a streamed fix: only a subscribed listener on a connected
    /// source is notified.
    pub fn accept_fix(&self, fix: LocationFix) -> Option<LocationFix> {
        if !self.subscribed {
            tracing::debug!("fix ignored, no listener registered");
            return None;
        }

        if !self.connected {
            tracing::warn!("fix ignored, source has not reported connected");
            return None;
        }

        Some(fix)
    }

    #[tracing::instrument(skip(self))]
    pub fn request_continuous_updates(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.request_location_updates();
            self.streaming = true;
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn stop_updates(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.remove_location_updates();
        }

        self.streaming = false;
    }

    #[tracing::instrument(skip(self))]
    pub fn deactivate(&mut self) {
        self.unsubscribe();
        self.stop_updates();

        if let Some(mut engine) = self.engine.take() {
            engine.deactivate();
            tracing::info!("location engine deactivated");
        }

        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Coordinate;
    use crate::testing::{EngineCall, FakeEngineProvider};

    fn fix() -> LocationFix {
        LocationFix::new(Coordinate::new(37.77, -122.41).unwrap(), Some(5.0))
    }

    #[test]
    fn activation_is_idempotent_and_high_accuracy() {
        let provider = FakeEngineProvider::new(None);
        let log = provider.log();
        let mut source = LocationSource::new(Box::new(provider));

        source.activate();
        source.activate();

        let log = log.lock().unwrap();
        assert_eq!(log.engines_obtained, 1);
        assert_eq!(
            log.calls,
            vec![
                EngineCall::SetPriority(LocationPriority::HighAccuracy),
                EngineCall::Activate,
            ]
        );
    }

    #[test]
    fn deactivate_without_activation_is_safe() {
        let provider = FakeEngineProvider::new(None);
        let log = provider.log();
        let mut source = LocationSource::new(Box::new(provider));

        source.deactivate();

        assert!(!source.is_active());
        assert!(log.lock().unwrap().calls.is_empty());
    }

    #[test]
    fn last_known_fix_comes_from_engine() {
        let mut source = LocationSource::new(Box::new(FakeEngineProvider::new(Some(fix()))));

        assert_eq!(source.last_known_fix(), None);

        source.activate();

        assert_eq!(source.last_known_fix().map(|f| f.coordinate), Some(fix().coordinate));
    }

    #[test]
    fn fixes_need_subscription_and_connection() {
        let (tx, _rx) = async_channel::unbounded();
        let mut source = LocationSource::new(Box::new(FakeEngineProvider::new(None)));

        source.activate();
        assert!(source.accept_fix(fix()).is_none());

        source.subscribe(LocationListener::new(tx));
        assert!(source.is_subscribed());
        assert!(source.accept_fix(fix()).is_none());

        source.on_connected();
        assert!(source.accept_fix(fix()).is_some());

        source.unsubscribe();
        assert!(source.accept_fix(fix()).is_none());
    }

    #[test]
    fn update_control_is_independent_of_activation() {
        let provider = FakeEngineProvider::new(None);
        let log = provider.log();
        let mut source = LocationSource::new(Box::new(provider));

        source.request_continuous_updates();
        assert!(!source.is_streaming());

        source.activate();
        source.request_continuous_updates();
        assert!(source.is_streaming());

        source.stop_updates();
        assert!(!source.is_streaming());
        assert!(source.is_active());

        source.deactivate();

        let log = log.lock().unwrap();
        assert_eq!(
            log.calls[2..],
            [
                EngineCall::RequestUpdates,
                EngineCall::RemoveUpdates,
                EngineCall::RemoveUpdates,
                EngineCall::Deactivate,
            ]
        );
    }
}
