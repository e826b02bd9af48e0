//! HTTP middleware (CORS, 404 handler)

use axum::Json;
use axum::extract::Request;
use axum::http::{Method, StatusCode, header};
use axum::response::IntoResponse;
use tower_http::cors::{Any, CorsLayer};

/// CORS layer: any origin, read and query methods only
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
}

/// JSON 404 naming the unmatched path and method
pub async fn handle_404(req: Request) -> impl IntoResponse {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    tracing::debug!(%method, %path, "[404] no route");

    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Endpoint not found",
            "path": path,
            "method": method,
        })),
    )
}
