//! Last-resort failure boundary for the whole pipeline.
//!
//! Responsibility:
//! - Log every unhandled failure at error severity with its full detail.
//! - Rewrite the response into the unhandled-failure JSON schema, mapping the
//!   failure kind to its status code.
//! - Catch panics from anywhere downstream so nothing escapes to the
//!   transport layer.
//!
//! Handlers surface failures as `AppError`; its `IntoResponse` leaves a
//! `Failure` record in the response extensions, which this layer consumes.
//! The rewrite mutates the response in place, so headers attached by inner
//! layers (security headers, HSTS, CORS) survive.
//!
//! The panic boundary is registered separately via [`catch_panics`] beneath
//! the header layers: a response fabricated for a panic must still flow out
//! through them to pick the policy headers up.

use std::any::Any;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header, header::HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::{Failure, FailureBody, FailureKind};

#[derive(Debug, Clone, Copy)]
pub struct ErrorPolicy {
    /// Include trace detail in response bodies. Off in production unless
    /// explicitly enabled.
    pub expose_details: bool,
}

/// Wrap the given Router with the translating boundary.
pub fn apply(router: Router, policy: ErrorPolicy) -> Router {
    router.layer(middleware::from_fn_with_state(policy, translate))
}

/// Catch panics from the routes below. Apply this beneath the header policy
/// layers so the fabricated 500 still carries them.
pub fn catch_panics(router: Router, policy: ErrorPolicy) -> Router {
    router.layer(CatchPanicLayer::custom(move |err| panic_response(policy, err)))
}

async fn translate(
    State(policy): State<ErrorPolicy>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;

    let Some(failure) = response.extensions_mut().remove::<Failure>() else {
        return response;
    };

    tracing::error!(
        kind = failure.kind.name(),
        message = %failure.message,
        details = failure.details.as_deref().unwrap_or("<none>"),
        "unhandled failure while processing request"
    );

    let body = FailureBody::new(&failure, policy.expose_details);
    let bytes = serde_json::to_vec(&body).unwrap_or_else(|_| b"{}".to_vec());

    *response.status_mut() = failure.kind.status();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response.headers_mut().remove(header::CONTENT_LENGTH);
    *response.body_mut() = Body::from(bytes);
    response
}

fn panic_response(policy: ErrorPolicy, err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    };

    tracing::error!(detail = %detail, "panic while processing request");

    let body = FailureBody {
        error: FailureKind::Internal.name(),
        status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        message: "internal server error".to_string(),
        details: policy.expose_details.then_some(detail),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
