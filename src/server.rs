//! Web server wiring for the dashboard.

use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::BusinessConfig;
use crate::database::DbPool;
use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<BusinessConfig>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/ok", get(handlers::ok))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

pub async fn run_server(addr: &str, state: AppState) -> Result<()> {
    let app = build_router(state);

    tracing::info!("Dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
