pub mod auth;
pub mod config;
pub mod exercises;
pub mod workouts;

use axum::Router;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::routes(state.clone()))
        .merge(exercises::routes(state.clone()))
        .merge(workouts::routes(state.clone()))
        .merge(config::routes(state))
}
