pub mod auth;
pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seeder;
pub mod state;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application: API routes, frontend, health check, CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let frontend = ServeDir::new(&state.config.frontend_dir);

    routes::create_router(state.clone())
        .route("/", get(redirect_to_app))
        .route("/health", get(health_check))
        .nest_service("/app", frontend)
        .layer(middleware::cors::cors_layer())
        .layer(axum_middleware::from_fn(middleware::cors::options_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_to_app() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/app")])
}

async fn health_check() -> &'static str {
    "OK"
}
