use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};

/// Any origin, the methods the API uses, and the two headers clients send.
/// The layer answers every OPTIONS request itself, so they never reach routing or auth.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Sits outside `cors_layer` and reports OPTIONS answers as 204 No Content.
pub async fn options_no_content(req: Request<Body>, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if is_options && response.status().is_success() {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
