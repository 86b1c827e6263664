//! User API Library
//!
//! This crate provides the HTTP REST API over the user service: routing,
//! request validation, health reporting, and OpenAPI documentation.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use user_service_lib::Storage;

use crate::config::ApiConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server until Ctrl+C.
pub async fn run(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        environment = %config.environment,
        backend = %config.user_service.backend,
        "Starting {}",
        config.server.service_name
    );

    let storage = Storage::connect(&config.user_service).await?;
    let state = AppState::from_storage(storage, config.server.service_name.clone());

    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
