//! Permissive CORS layer shared by all workers.

use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer used by every worker.
///
/// The workers are public JSON APIs consumed from arbitrary origins, so the
/// policy allows any origin, method and header. Preflight `OPTIONS` requests
/// are answered by the layer itself.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
