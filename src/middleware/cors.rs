use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// CORS for the public site. With a configured frontend origin only that
/// origin is echoed; otherwise any origin may read the public endpoints.
pub fn public_cors(frontend_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    match frontend_origin.and_then(|o| HeaderValue::from_str(o.trim_end_matches('/')).ok()) {
        Some(origin) => layer.allow_origin(AllowOrigin::exact(origin)),
        None => {
            if let Some(raw) = frontend_origin {
                tracing::warn!(origin = %raw, "ignoring unparseable FRONTEND_ORIGIN");
            }
            layer.allow_origin(Any)
        }
    }
}
