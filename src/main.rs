use std::sync::Arc;
use std::time::Duration;

use futures::future::{self, Either};

use wayfinder::config::Config;
use wayfinder::coordinator::{Collaborators, Coordinator};
use wayfinder::error::Error;
use wayfinder::external::mapbox::MapboxDirections;
use wayfinder::server::serve;
use wayfinder::simulation::{
    SimulatedLocationProvider, SimulatedPermissionPrompt, TracingControls, TracingLauncher,
    TracingMap,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let coordinator = Coordinator::new(
        config.session.clone(),
        Collaborators {
            prompt: Arc::new(SimulatedPermissionPrompt {
                answer: true,
                delay: Duration::from_millis(500),
            }),
            locations: Box::new(SimulatedLocationProvider {
                origin: config.simulated_origin,
                interval: Duration::from_secs(1),
            }),
            directions: Arc::new(MapboxDirections::new(config.mapbox.clone())),
            map: Box::new(TracingMap),
            controls: Box::new(TracingControls),
            launcher: Box::new(TracingLauncher),
        },
    );

    let handle = coordinator.handle();
    let session = tokio::spawn(coordinator.run());

    // the process ends with the session or the server, whichever goes first
    match future::select(session, Box::pin(serve(handle, config.listen_addr))).await {
        Either::Left((joined, _)) => {
            if let Err(err) = joined {
                tracing::error!("session task failed: {}", err);
            }
            Ok(())
        }
        Either::Right((served, _)) => served,
    }
}
