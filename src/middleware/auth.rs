use axum::{response::{Response, IntoResponse}};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use crate::auth::jwt::verify_token;
use crate::state::AppState;
use serde::Serialize;

/// Identity of the caller, resolved from the bearer token before any protected handler runs.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
}

#[derive(Serialize)]
struct ErrorBody { error: String }

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_header = match req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return unauthorized("missing token"),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) if !t.trim().is_empty() => t.trim(),
        _ => return unauthorized("missing token"),
    };

    let claims = match verify_token(token, &state.config.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            return unauthorized("invalid token");
        }
    };

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        email: claims.email,
    });

    next.run(req).await
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(ErrorBody { error: msg.to_string() });
    (StatusCode::UNAUTHORIZED, body).into_response()
}
