//! # Foresight Server
//!
//! HTTP service that accepts foresight generation requests, validates them
//! against a JSON Schema, and serves canned artifact bundles after a short
//! deferred-completion delay.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod api;
pub mod bundle;
pub mod registry;
pub mod schema;

pub use api::AppState;

/// How long a run stays in `processing` before its result is stored.
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(400);

/// Run the server on the given address.
pub async fn run_server(addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(DEFAULT_COMPLETION_DELAY)?;
    let app = create_router(state);

    info!("listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/v1/generate", post(api::generate))
        .route("/v1/runs/:id", get(api::get_run))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
