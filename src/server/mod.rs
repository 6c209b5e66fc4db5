mod handlers;

use std::net::SocketAddr;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::coordinator::CoordinatorHandle;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{destinations, navigation, session};

/// Exposes the session's action surface over HTTP for headless hosts.
pub fn router(handle: CoordinatorHandle) -> Router {
    Router::new()
        .route("/session", get(session::find).delete(session::destroy))
        .route("/session/start", patch(session::start))
        .route("/session/stop", patch(session::stop))
        .route("/destinations", post(destinations::create))
        .route("/navigation/start", post(navigation::start))
        .layer(Extension(handle))
}

pub async fn serve(handle: CoordinatorHandle, addr: SocketAddr) -> Result<(), Error> {
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(router(handle).into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server error: {}", err);
            unexpected_error()
        })
}
