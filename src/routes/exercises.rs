use axum::{routing::get, Router, middleware};
use crate::handlers::exercise::list_exercises;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/exercises", get(list_exercises))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
