use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

/// A WGS84 position. Latitude first, the way the map surface reports taps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid_input_error());
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.longitude, coordinate.latitude)
    }
}

// directions APIs want "lon,lat"
impl From<Coordinate> for String {
    fn from(coordinate: Coordinate) -> Self {
        format!("{},{}", coordinate.longitude, coordinate.latitude)
    }
}
