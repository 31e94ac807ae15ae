use tower_http::cors::{Any, CorsLayer};

/// The frontend may be served from a different origin than the API.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
