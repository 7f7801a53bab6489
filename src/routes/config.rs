use axum::{routing::get, Router, middleware};
use crate::handlers::config::get_client_config;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/config", get(get_client_config))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
