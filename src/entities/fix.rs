use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Coordinate;

/// A single position reading from the location engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
    /// Horizontal accuracy in meters, when the engine reports one.
    pub accuracy: Option<f64>,
}

impl LocationFix {
    pub fn new(coordinate: Coordinate, accuracy: Option<f64>) -> Self {
        Self {
            coordinate,
            timestamp: Utc::now(),
            accuracy,
        }
    }
}
