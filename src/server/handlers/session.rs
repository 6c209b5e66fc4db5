use axum::extract::{Extension, Json};
use axum::http::StatusCode;

use crate::coordinator::{CoordinatorHandle, Event, Lifecycle, SessionSnapshot};
use crate::error::Error;

pub async fn find(Extension(handle): Extension<CoordinatorHandle>) -> Json<SessionSnapshot> {
    handle.snapshot().into()
}

pub async fn start(Extension(handle): Extension<CoordinatorHandle>) -> Result<StatusCode, Error> {
    handle.send(Event::Lifecycle(Lifecycle::Start)).await?;

    Ok(StatusCode::ACCEPTED)
}

pub async fn stop(Extension(handle): Extension<CoordinatorHandle>) -> Result<StatusCode, Error> {
    handle.send(Event::Lifecycle(Lifecycle::Stop)).await?;

    Ok(StatusCode::ACCEPTED)
}

pub async fn destroy(Extension(handle): Extension<CoordinatorHandle>) -> Result<StatusCode, Error> {
    handle.send(Event::Lifecycle(Lifecycle::Destroy)).await?;

    Ok(StatusCode::ACCEPTED)
}
