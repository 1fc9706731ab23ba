//! API layer - routes, handlers, and middleware

pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let cors_origins = state.config.server.cors_origins.clone();

    let fhir_router = routes::fhir_routes()
        .layer(axum::middleware::from_fn(crate::auth::auth_middleware));

    Router::new()
        // Health check (outside the auth gate)
        .route("/health", get(health_check))
        // Root endpoint
        .route("/", get(root))
        // Favicon handler (returns 204 to prevent 404 logs)
        .route("/favicon.ico", get(favicon))
        // FHIR API routes
        .nest("/fhir/R4", fhir_router)
        // Add state
        .with_state(state)
        // Add middleware (applied in reverse order)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::cors(&cors_origins))
        .layer(middleware::trace())
        // Limit request body size to prevent DoS via large payloads
        .layer(DefaultBodyLimit::max(max_body_size))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "up",
        "service": "zarish-fhir-server"
    }))
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
    // Informational endpoint, not a FHIR interaction.
    (
        StatusCode::OK,
        Json(json!({
            "server": "Zarish Sphere FHIR Server",
            "version": env!("CARGO_PKG_VERSION"),
            "fhirVersion": state.config.fhir.version,
            "status": "running"
        })),
    )
}

async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
