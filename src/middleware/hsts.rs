//! Strict-Transport-Security enforcement.
//!
//! Responsibility:
//! - Instruct clients to only contact the server over TLS for a configured
//!   duration, optionally covering subdomains and opting into preload lists.
//!
//! The value format deliberately reproduces the reference deployment
//! byte-for-byte, including its trailing separator after `max-age` when the
//! flags are off (`max-age=3600; `). Header values may carry trailing spaces,
//! and keeping the literal format makes configuration round-trips verifiable.

use axum::Router;
use axum::http::header::{self, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HstsConfig {
    pub max_age_seconds: u64,
    pub include_subdomains: bool,
    pub preload: bool,
}

impl HstsConfig {
    /// One year.
    pub const DEFAULT_MAX_AGE_SECONDS: u64 = 31_536_000;

    /// Render the `Strict-Transport-Security` value.
    pub fn header_value(&self) -> String {
        format!(
            "max-age={}; {}{}",
            self.max_age_seconds,
            if self.include_subdomains {
                "includeSubDomains; "
            } else {
                ""
            },
            if self.preload { "preload" } else { "" },
        )
    }
}

impl Default for HstsConfig {
    fn default() -> Self {
        Self {
            max_age_seconds: Self::DEFAULT_MAX_AGE_SECONDS,
            include_subdomains: true,
            preload: false,
        }
    }
}

/// Apply the HSTS header to all responses.
pub fn apply(router: Router, config: &HstsConfig) -> Router {
    // Digits, ASCII letters, `;` and space only, so this cannot fail.
    let value = HeaderValue::from_str(&config.header_value())
        .expect("HSTS header value is valid ASCII");

    router.layer(SetResponseHeaderLayer::overriding(
        header::STRICT_TRANSPORT_SECURITY,
        value,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    #[test]
    fn default_value() {
        assert_eq!(
            HstsConfig::default().header_value(),
            "max-age=31536000; includeSubDomains; "
        );
    }

    #[test]
    fn all_flags_on() {
        let config = HstsConfig {
            max_age_seconds: 63_072_000,
            include_subdomains: true,
            preload: true,
        };
        assert_eq!(
            config.header_value(),
            "max-age=63072000; includeSubDomains; preload"
        );
    }

    #[test]
    fn all_flags_off_keeps_trailing_separator() {
        let config = HstsConfig {
            max_age_seconds: 3600,
            include_subdomains: false,
            preload: false,
        };
        assert_eq!(config.header_value(), "max-age=3600; ");
    }

    #[tokio::test]
    async fn header_lands_on_responses() {
        let config = HstsConfig {
            max_age_seconds: 63_072_000,
            include_subdomains: true,
            preload: true,
        };
        let router = apply(Router::new().route("/", get(|| async { "ok" })), &config);

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.headers()["strict-transport-security"],
            "max-age=63072000; includeSubDomains; preload"
        );
    }
}
