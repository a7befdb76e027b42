//! Security-related response headers for browser clients.
//!
//! This middleware is intended to be applied at the Router level
//! (not inside individual handlers).
//!
//! Responsibility:
//! - MIME sniffing protection
//! - Clickjacking protection
//! - Legacy XSS filter opt-in
//! - Referrer leakage control
//! - Content Security Policy
//!
//! Values are fixed literals, exposed as constants so a deployment can fork
//! the policy without touching the layer wiring. The layers use `overriding`:
//! these headers are owned here, and whatever a handler set loses.

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

pub const X_CONTENT_TYPE_OPTIONS: &str = "nosniff";
pub const X_FRAME_OPTIONS: &str = "DENY";
pub const X_XSS_PROTECTION: &str = "1; mode=block";
pub const REFERRER_POLICY: &str = "no-referrer";
pub const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; script-src 'self'; style-src 'self'; img-src 'self' ; font-src 'self' ; connect-src 'self'";

/// Apply common security headers to all responses.
pub fn apply(router: Router) -> Router {
    router
        // Prevent MIME sniffing
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static(X_CONTENT_TYPE_OPTIONS),
        ))
        // Clickjacking protection
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static(X_FRAME_OPTIONS),
        ))
        // Legacy browsers only; modern ones ignore it
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static(X_XSS_PROTECTION),
        ))
        // Limit referrer leakage
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static(REFERRER_POLICY),
        ))
        // Same-origin-only sources across the board
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("content-security-policy"),
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
}
