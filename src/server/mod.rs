pub mod handlers;
mod types;

pub use types::{ErrorResponse, HealthResponse};

use crate::{Result, config::Config, handler::RequestHandler};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(handler: Arc<RequestHandler>) -> Router {
    let app_state = handlers::AppState { handler };

    Router::new()
        .route("/", post(handlers::invoke))
        .route("/invoke", post(handlers::invoke))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<()> {
    // Collaborators and settings are resolved once for the process lifetime
    let handler = Arc::new(RequestHandler::from_config(&config)?);

    let app = router(handler);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting invocation host on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
