/// Route definitions and middleware setup
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    email_registered, login, me, phone_registered, register, username_registered,
};
use crate::metrics;
use crate::openapi::ApiDoc;
use crate::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Authentication endpoints
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        // Existence probes
        .route(
            "/api/v1/users/exists/username/:username",
            get(username_registered),
        )
        .route("/api/v1/users/exists/phone/:phone", get(phone_registered))
        .route("/api/v1/users/exists/email/:email", get(email_registered))
        // Health checks
        .route("/health", get(health_check))
        .route("/readiness", get(readiness_check))
        .route("/metrics", get(metrics::metrics_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check endpoint
async fn readiness_check() -> &'static str {
    "READY"
}
