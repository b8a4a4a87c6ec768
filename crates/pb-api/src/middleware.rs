//! pulse-board/crates/pb-api/src/middleware.rs
//!
//! Standard middleware for logging and cross-origin access.

use actix_cors::Cors;
use actix_web::middleware::Logger;

// Returns the standard request logger:
// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn standard_middleware() -> Logger {
    Logger::default()
}

// Configures CORS (Cross-Origin Resource Sharing).
// The presentation layer is expected to live on a different origin
// during development.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT"])
        .allow_any_header()
        .max_age(3600)
}
