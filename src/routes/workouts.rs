use axum::{
    routing::get,
    Router,
};
use crate::state::AppState;
use crate::handlers::{report, workout};
use crate::middleware::auth::require_auth;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/workouts", get(workout::list_workouts).post(workout::create_workout))
        // Static segment wins over the `{id}` capture.
        .route("/workouts/report", get(report::get_report))
        .route(
            "/workouts/{id}",
            get(workout::get_workout).put(workout::update_workout).delete(workout::delete_workout),
        )
        .route_layer(axum::middleware::from_fn_with_state(state, require_auth))
}
