//! Request size limiting based on the declared Content-Length.
//!
//! Especially for write-heavy APIs it is important to bound request sizes to
//! blunt denial-of-service attempts. Requests whose declared length exceeds
//! the limit are rejected with 413 before the handler runs.
//!
//! Requests without a declared length (e.g. chunked transfer) pass this check
//! unchanged: the gate is fail-open and only bounds declared bodies. A
//! streaming byte limit would be `tower_http::limit::RequestBodyLimitLayer`;
//! this layer exists for the explicit 413 JSON contract.

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 1 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimit {
    pub max_bytes: u64,
}

impl SizeLimit {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl Default for SizeLimit {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES)
    }
}

/// Rejection schema for oversized requests. Field casing is part of the
/// contract.
#[derive(Debug, Serialize)]
struct SizeLimitBody {
    error: &'static str,
    #[serde(rename = "maxSize")]
    max_size: u64,
    status: u16,
}

/// Apply the size-limit gate to the given Router.
pub fn apply(router: Router, limit: SizeLimit) -> Router {
    router.layer(middleware::from_fn_with_state(limit, enforce))
}

async fn enforce(
    State(limit): State<SizeLimit>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let declared_length = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());

    match declared_length {
        Some(length) if length > limit.max_bytes => {
            let body = SizeLimitBody {
                error: "Request Entity Too Large",
                max_size: limit.max_bytes,
                status: StatusCode::PAYLOAD_TOO_LARGE.as_u16(),
            };
            (StatusCode::PAYLOAD_TOO_LARGE, Json(body)).into_response()
        }
        // Within the limit, or no declared length: continue the chain.
        _ => next.run(req).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::routing::post;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn router(limit: SizeLimit) -> Router {
        apply(
            Router::new().route("/upload", post(|| async { "accepted" })),
            limit,
        )
    }

    fn request(content_length: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/upload");
        if let Some(length) = content_length {
            builder = builder.header(header::CONTENT_LENGTH, length);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn rejects_oversized_declared_length() {
        let response = router(SizeLimit::new(1_048_576))
            .oneshot(request(Some("2097152")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "error": "Request Entity Too Large",
                "maxSize": 1_048_576,
                "status": 413
            })
        );
    }

    #[tokio::test]
    async fn passes_length_at_the_limit() {
        let response = router(SizeLimit::new(1024))
            .oneshot(request(Some("1024")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn passes_missing_content_length() {
        let response = router(SizeLimit::new(1024))
            .oneshot(request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn passes_unparseable_content_length() {
        // hyper normally rejects these upstream; the gate itself is fail-open.
        let response = router(SizeLimit::new(1024))
            .oneshot(request(Some("not-a-number")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
