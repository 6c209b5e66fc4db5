use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::entities::Coordinate;
use crate::error::{config_error, Error};

pub const DEFAULT_CAMERA_ZOOM: f64 = 13.0;
pub const MAX_CAMERA_ZOOM: f64 = 22.0;

/// When the start control becomes enabled after a destination tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartPolicy {
    /// enable as soon as a destination is picked
    OnTap,
    /// disable on tap, enable once that destination's route arrives
    OnRoute,
}

impl FromStr for StartPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_tap" => Ok(Self::OnTap),
            "on_route" => Ok(Self::OnRoute),
            _ => Err(config_error("START_POLICY")),
        }
    }
}

/// Coordinator behaviour knobs.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub camera_zoom: f64,
    pub simulate_route: bool,
    pub start_policy: StartPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            camera_zoom: DEFAULT_CAMERA_ZOOM,
            simulate_route: true,
            start_policy: StartPolicy::OnTap,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MapboxConfig {
    pub api_base: String,
    pub access_token: String,
    pub profile: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub session: SessionConfig,
    pub mapbox: MapboxConfig,
    pub listen_addr: SocketAddr,
    pub simulated_origin: Coordinate,
}

impl Config {
    #[tracing::instrument]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let session = SessionConfig {
            camera_zoom: camera_zoom(parse_or("CAMERA_ZOOM", DEFAULT_CAMERA_ZOOM)?)?,
            simulate_route: parse_or("SIMULATE_ROUTE", true)?,
            start_policy: parse_or("START_POLICY", StartPolicy::OnTap)?,
        };

        let mapbox = MapboxConfig {
            api_base: env::var("MAPBOX_API_BASE").unwrap_or_else(|_| "api.mapbox.com".into()),
            access_token: env::var("MAPBOX_ACCESS_TOKEN")?,
            profile: env::var("MAPBOX_PROFILE").unwrap_or_else(|_| "driving-traffic".into()),
        };

        let listen_addr = parse_or("LISTEN_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?;

        let simulated_origin = match env::var("SIMULATED_ORIGIN") {
            Ok(value) => parse_coordinate(&value).ok_or_else(|| config_error("SIMULATED_ORIGIN"))?,
            Err(_) => Coordinate {
                latitude: 37.77,
                longitude: -122.41,
            },
        };

        Ok(Self {
            session,
            mapbox,
            listen_addr,
            simulated_origin,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, Error> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| config_error(key)),
        Err(_) => Ok(default),
    }
}

fn camera_zoom(zoom: f64) -> Result<f64, Error> {
    if zoom.is_finite() && (0.0..=MAX_CAMERA_ZOOM).contains(&zoom) {
        Ok(zoom)
    } else {
        Err(config_error("CAMERA_ZOOM"))
    }
}

/// Parses "lat,lon".
fn parse_coordinate(value: &str) -> Option<Coordinate> {
    let (latitude, longitude) = value.split_once(',')?;

    Coordinate::new(latitude.trim().parse().ok()?, longitude.trim().parse().ok()?).ok()
}
