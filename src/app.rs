/*
 * Responsibility
 * - Config load -> Router assembly -> axum::serve()
 * - middleware application order (the pipeline lives here)
 */
use anyhow::Result;
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::middleware::{
    cors,
    error_translator::{self, ErrorPolicy},
    hsts, http, permissions_policy, security_headers,
    size_limit::{self, SizeLimit},
};

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = build_router(&config);

    tracing::info!(addr = %config.addr, env = ?config.app_env, "listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(config: &Config) -> Router {
    pipeline(routes(), config)
}

/// Assemble the pipeline around the given routes. Layers are applied
/// innermost-first, so reading bottom-up gives the request's path:
/// request-id/trace -> failure translator -> secure headers -> HSTS -> CORS
/// -> size limit -> permissions policy -> panic boundary -> routes.
///
/// The panic boundary sits beneath the header layers: a response it
/// fabricates still flows out through them and carries the policy headers.
fn pipeline(router: Router, config: &Config) -> Router {
    let policy = ErrorPolicy {
        expose_details: config.expose_error_details,
    };

    let router = error_translator::catch_panics(router, policy);

    // Development trades the policy stack for fast iteration; the failure
    // boundary and infrastructure layers stay on in both environments.
    let router = if config.app_env.is_production() {
        let router = permissions_policy::apply(router);
        let router = size_limit::apply(router, SizeLimit::new(config.max_request_bytes));
        let router = cors::apply(router);
        let router = hsts::apply(router, &config.hsts);
        security_headers::apply(router)
    } else {
        router
    };

    let router = error_translator::apply(router, policy);
    http::apply(router)
}

fn routes() -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .fallback(unknown_route)
}

async fn hello() -> &'static str {
    "Hello World!"
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Unknown paths go through the failure boundary like any other not-found.
async fn unknown_route() -> AppError {
    AppError::not_found("route")
}
