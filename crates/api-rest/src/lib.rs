//! # API REST
//!
//! REST API implementation for trip search.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for wire types and `trips-core` for the search itself.

#![warn(rust_2018_idioms)]

pub mod handlers;

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{ErrorRes, HealthRes, TripRecord, TripsRes};
use trips_core::TripService;

/// Application state shared across REST API handlers
///
/// The catalogue inside the service is shared read-only; cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub trip_service: TripService,
}

impl AppState {
    pub fn new(trip_service: TripService) -> Self {
        Self { trip_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::hello, handlers::search_trips),
    components(schemas(HealthRes, TripRecord, TripsRes, ErrorRes))
)]
pub struct ApiDoc;

/// Build the REST router with all routes, Swagger UI and a permissive CORS layer.
///
/// The browser client is served from a different origin, so any origin is allowed.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api", get(handlers::hello))
        .route("/api/trips", get(handlers::search_trips))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the REST API until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if:
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("-- Trip search REST API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Trip search REST API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
