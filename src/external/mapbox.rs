use async_trait::async_trait;
use geo_types::LineString;
use serde::{Deserialize, Serialize};

use crate::{
    api::DirectionsService,
    config::MapboxConfig,
    entities::{Route, RouteLeg, RouteRequest},
    error::Error,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub code: String,
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsRoute {
    pub distance: f64,
    pub duration: f64,
    pub geometry: Geometry,
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsLeg {
    #[serde(default)]
    pub summary: String,
    pub distance: f64,
    pub duration: f64,
}

impl DirectionsRoute {
    pub fn into_route(self, request: RouteRequest) -> Route {
        let legs = self
            .legs
            .into_iter()
            .map(|leg| RouteLeg {
                summary: leg.summary,
                distance: leg.distance,
                duration: leg.duration,
            })
            .collect();

        Route::new(
            request,
            self.distance,
            self.duration,
            LineString::from(self.geometry.coordinates),
            legs,
        )
    }
}

impl DirectionsResponse {
    /// Ranked candidates, best first.
    pub fn into_routes(self, request: RouteRequest) -> Vec<Route> {
        if self.code != "Ok" {
            tracing::warn!(code = %self.code, message = ?self.message, "directions service reported no route");
        }

        self.routes
            .into_iter()
            .map(|route| route.into_route(request))
            .collect()
    }
}

#[derive(Debug)]
pub struct MapboxDirections {
    client: reqwest::Client,
    config: MapboxConfig,
}

impl MapboxDirections {
    pub fn new(config: MapboxConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, request: &RouteRequest) -> String {
        let origin: String = request.origin.into();
        let destination: String = request.destination.into();

        // a bare host means https
        let base = if self.config.api_base.contains("://") {
            self.config.api_base.clone()
        } else {
            format!("https://{}", self.config.api_base)
        };

        format!(
            "{}/directions/v5/mapbox/{}/{};{}",
            base.trim_end_matches('/'),
            self.config.profile,
            origin,
            destination
        )
    }
}

#[async_trait]
impl DirectionsService for MapboxDirections {
    #[tracing::instrument(skip(self))]
    async fn get_route(&self, request: RouteRequest) -> Result<Option<Vec<Route>>, Error> {
        let res = self
            .client
            .get(self.url(&request))
            .query(&[("access_token", self.config.access_token.as_str())])
            .query(&[("geometries", "geojson")])
            .query(&[("overview", "full")])
            .query(&[("steps", "true")])
            .query(&[("alternatives", "true")])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        tracing::debug!("Response code: {}", status_code);

        if !res.status().is_success() {
            return Ok(None);
        }

        let data: DirectionsResponse = res.json().await?;

        Ok(Some(data.into_routes(request)))
    }
}
