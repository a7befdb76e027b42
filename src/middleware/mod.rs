/*
 * Responsibility
 * - public interface of the middleware stack (re-export)
 * - each module exposes apply(router, ...) so app.rs stays declarative
 */
pub mod cors;
pub mod error_translator;
pub mod hsts;
pub mod http;
pub mod permissions_policy;
pub mod security_headers;
pub mod size_limit;
