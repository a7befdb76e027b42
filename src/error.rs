/*
 * Responsibility
 * - app-wide AppError definition (tagged failure kinds)
 * - explicit kind -> HTTP status mapping
 * - IntoResponse implementation; hands the full failure record to the
 *   error_translator middleware via response extensions
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Closed-for-now set of failure kinds. New kinds get a new variant here and
/// a new arm in `status()` / `name()`; existing mappings stay untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unauthorized,
    InvalidArgument,
    NotFound,
    Internal,
}

impl FailureKind {
    pub fn status(self) -> StatusCode {
        match self {
            FailureKind::Unauthorized => StatusCode::UNAUTHORIZED,
            FailureKind::InvalidArgument => StatusCode::BAD_REQUEST,
            FailureKind::NotFound => StatusCode::NOT_FOUND,
            FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FailureKind::Unauthorized => "Unauthorized",
            FailureKind::InvalidArgument => "InvalidArgument",
            FailureKind::NotFound => "NotFound",
            FailureKind::Internal => "Internal",
        }
    }
}

// Unauthorized and InvalidArgument have no built-in producer yet; they are
// the surface for authenticated/validated routes, hence the allows.
#[derive(Debug, Error)]
pub enum AppError {
    #[allow(dead_code)]
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[allow(dead_code)]
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    #[allow(dead_code)]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    #[allow(dead_code)]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::Unauthorized(_) => FailureKind::Unauthorized,
            AppError::InvalidArgument(_) => FailureKind::InvalidArgument,
            AppError::NotFound { .. } => FailureKind::NotFound,
            AppError::Internal(_) => FailureKind::Internal,
        }
    }

    /// Trace detail for operators. Only `Internal` carries a source chain;
    /// the policy kinds are self-describing.
    fn details(&self) -> Option<String> {
        match self {
            AppError::Internal(err) => Some(format!("{err:?}")),
            _ => None,
        }
    }
}

/// Full failure record, stashed in response extensions for the
/// error_translator middleware to log and serialize.
#[derive(Debug, Clone)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub details: Option<String>,
}

/// Wire schema for unhandled failures. Field casing is part of the contract.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub error: &'static str,
    #[serde(rename = "StatusCode")]
    pub status_code: u16,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Details")]
    pub details: Option<String>,
}

impl FailureBody {
    pub fn new(failure: &Failure, expose_details: bool) -> Self {
        Self {
            error: failure.kind.name(),
            status_code: failure.kind.status().as_u16(),
            message: failure.message.clone(),
            details: if expose_details {
                failure.details.clone()
            } else {
                None
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let failure = Failure {
            kind: self.kind(),
            message: match &self {
                // `Internal` hides its message from clients; the real cause
                // goes into `details` for the translator to log.
                AppError::Internal(_) => "internal server error".to_string(),
                other => other.to_string(),
            },
            details: self.details(),
        };

        // Redacted body so the status/schema hold even without the
        // translator layer; the translator rewrites it with policy applied.
        let body = FailureBody::new(&failure, false);
        let mut response = (failure.kind.status(), Json(body)).into_response();
        response.extensions_mut().insert(failure);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_to_status_mapping() {
        assert_eq!(FailureKind::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            FailureKind::InvalidArgument.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(FailureKind::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            FailureKind::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn into_response_stamps_failure_extension() {
        let response = AppError::not_found("user").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let failure = response
            .extensions()
            .get::<Failure>()
            .expect("failure record");
        assert_eq!(failure.kind, FailureKind::NotFound);
        assert_eq!(failure.message, "user not found");
        assert!(failure.details.is_none());
    }

    #[test]
    fn internal_failure_hides_cause_from_message() {
        let err = AppError::from(anyhow::anyhow!("db connection refused"));
        let response = err.into_response();

        let failure = response.extensions().get::<Failure>().unwrap();
        assert_eq!(failure.message, "internal server error");
        assert!(failure.details.as_deref().unwrap().contains("db connection refused"));
    }
}
