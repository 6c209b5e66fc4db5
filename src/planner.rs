use std::sync::Arc;

use async_channel::Sender;
use tokio::task::JoinHandle;

use crate::api::DirectionsService;
use crate::coordinator::Event;
use crate::entities::{Route, RouteRequest};
use crate::error::{empty_route_response_error, Error};

/// Issues directions requests one at a time. Every request gets a new
/// generation; a result is current only while its generation is the latest.
pub struct RoutePlanner {
    service: Arc<dyn DirectionsService>,
    events: Sender<Event>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl RoutePlanner {
    pub fn new(service: Arc<dyn DirectionsService>, events: Sender<Event>) -> Self {
        Self {
            service,
            events,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    #[tracing::instrument(skip(self))]
    pub fn plan(&mut self, request: RouteRequest) -> u64 {
        self.generation += 1;
        let generation = self.generation;

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        let service = self.service.clone();
        let events = self.events.clone();

        self.in_flight = Some(tokio::spawn(async move {
            let result = fetch_route(service.as_ref(), request).await;

            if events
                .send(Event::RouteResult { generation, result })
                .await
                .is_err()
            {
                tracing::warn!("route result dropped, coordinator is gone");
            }
        }));

        generation
    }

    /// Aborts any outstanding request task.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

/// Resolves a request to the highest-ranked candidate route.
#[tracing::instrument(skip(service))]
pub async fn fetch_route(
    service: &dyn DirectionsService,
    request: RouteRequest,
) -> Result<Route, Error> {
    let routes = match service.get_route(request).await? {
        Some(routes) => routes,
        None => {
            tracing::error!("No routes found, make sure you set the right user and access token.");
            return Err(empty_route_response_error());
        }
    };

    match routes.into_iter().next() {
        Some(route) => Ok(route),
        None => {
            tracing::error!("No routes found");
            Err(empty_route_response_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Coordinate;
    use crate::error::transport_error;
    use crate::testing::{sample_route, ScriptedDirections};

    fn request() -> RouteRequest {
        RouteRequest {
            origin: Coordinate::new(37.77, -122.41).unwrap(),
            destination: Coordinate::new(37.79, -122.43).unwrap(),
        }
    }

    #[tokio::test]
    async fn picks_first_candidate() {
        let first = sample_route(request());
        let second = sample_route(request());
        let service = ScriptedDirections::new(vec![Ok(Some(vec![first.clone(), second]))]);

        let route = fetch_route(service.as_ref(), request()).await.unwrap();

        assert_eq!(route.token, first.token);
    }

    #[tokio::test]
    async fn absent_and_empty_bodies_are_failures() {
        let service = ScriptedDirections::new(vec![Ok(None), Ok(Some(vec![]))]);

        let absent = fetch_route(service.as_ref(), request()).await.unwrap_err();
        let empty = fetch_route(service.as_ref(), request()).await.unwrap_err();

        assert_eq!(absent.code, empty_route_response_error().code);
        assert_eq!(empty.code, empty_route_response_error().code);
    }

    #[tokio::test]
    async fn transport_failure_is_distinct_from_empty() {
        let service = ScriptedDirections::new(vec![Err(transport_error("connection reset"))]);

        let err = fetch_route(service.as_ref(), request()).await.unwrap_err();

        assert_ne!(err.code, empty_route_response_error().code);
        assert_eq!(err.code, transport_error("connection reset").code);
    }

    #[tokio::test]
    async fn results_are_tagged_with_generation() {
        let (tx, rx) = async_channel::unbounded();
        let route = sample_route(request());
        let service = ScriptedDirections::new(vec![Ok(Some(vec![route.clone()]))]);
        let mut planner = RoutePlanner::new(service, tx);

        let generation = planner.plan(request());

        assert_eq!(generation, 1);
        assert!(planner.is_current(1));

        match rx.recv().await.unwrap() {
            Event::RouteResult { generation, result } => {
                assert_eq!(generation, 1);
                assert_eq!(result.unwrap().token, route.token);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn new_request_supersedes_previous() {
        let (tx, _rx) = async_channel::unbounded();
        let mut planner = RoutePlanner::new(ScriptedDirections::new(vec![]), tx);

        let first = planner.plan(request());
        let second = planner.plan(request());

        assert!(!planner.is_current(first));
        assert!(planner.is_current(second));
        assert_eq!(planner.generation(), 2);
    }
}
