//! Permissions-Policy: restrict which browser features pages may use.
//!
//! Geolocation stays available to same-origin documents; everything else in
//! the list is disabled outright.

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

pub const PERMISSIONS_POLICY: &str =
    "geolocation=(self), microphone=(), camera=(), fullscreen=(), payment=()";

/// Apply the Permissions-Policy header to all responses.
pub fn apply(router: Router) -> Router {
    router.layer(SetResponseHeaderLayer::overriding(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(PERMISSIONS_POLICY),
    ))
}
