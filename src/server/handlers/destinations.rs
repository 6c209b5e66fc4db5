use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::coordinator::{CoordinatorHandle, Event};
use crate::entities::Coordinate;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    latitude: f64,
    longitude: f64,
}

/// A map tap on the given position.
pub async fn create(
    Extension(handle): Extension<CoordinatorHandle>,
    Json(params): Json<CreateParams>,
) -> Result<StatusCode, Error> {
    let destination = Coordinate::new(params.latitude, params.longitude)?;

    handle.send(Event::UserTap(destination)).await?;

    Ok(StatusCode::ACCEPTED)
}
