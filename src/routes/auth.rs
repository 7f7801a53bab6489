use axum::{Router, routing::{post, get}, middleware};
use crate::state::AppState;
use crate::handlers::user::{register_user, login_user, get_me};
use crate::middleware::auth::require_auth;

pub fn routes(state: AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/auth/register", post(register_user))
        .route("/auth/login", post(login_user));

    let protected = Router::new()
        .route("/auth/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    open.merge(protected)
}
