//! CORS policy for browser clients.
//!
//! Note:
//! - CORS is enforced by browsers. Native mobile apps and server-to-server
//!   calls are not restricted by CORS.
//! - This middleware should be applied at the Router level (not inside
//!   handlers).
//!
//! Policy:
//! - Single trusted origin, fixed method and header allowlists, attached to
//!   every response. `tower_http::cors::CorsLayer` is deliberately not used
//!   here: it only emits these headers when the request carries an `Origin`
//!   header, and the contract is that every response carries them.

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "https://trusted.example.com";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Apply the CORS response headers to the given Router.
pub fn apply(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-origin"),
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-methods"),
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
}
