use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Full application router: API under `/api` with CORS and a body size limit
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(state))
        .layer(RequestBodyLimitLayer::new(server.body_limit_kb as usize * 1024))
        .layer(cors)
}

pub async fn run(state: AppState, server: &ServerConfig) -> Result<()> {
    let addr = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app(state, server))
        .await
        .context("Web server stopped unexpectedly")?;
    Ok(())
}
