use axum::extract::Extension;
use axum::http::StatusCode;

use crate::coordinator::{CoordinatorHandle, Event};
use crate::error::{precondition_error, Error};

pub async fn start(Extension(handle): Extension<CoordinatorHandle>) -> Result<StatusCode, Error> {
    // mirror the on-screen control: a disabled button cannot be clicked
    if !handle.snapshot().start_enabled {
        return Err(precondition_error("start navigation is disabled"));
    }

    handle.send(Event::StartClicked).await?;

    Ok(StatusCode::ACCEPTED)
}
