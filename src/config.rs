/*
 * Responsibility
 * - load environment configuration (listen address, APP_ENV, policy knobs)
 * - validate at startup (fail fast on broken values)
 * - all values are read once here and passed into middleware constructors;
 *   nothing reads the environment after startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::middleware::hsts::HstsConfig;
use crate::middleware::size_limit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub hsts: HstsConfig,
    pub max_request_bytes: u64,

    /// Include trace detail in unhandled-failure response bodies.
    /// Defaults to on in development only.
    pub expose_error_details: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let hsts = HstsConfig {
            max_age_seconds: env_parse("HSTS_MAX_AGE_SECONDS")?
                .unwrap_or(HstsConfig::DEFAULT_MAX_AGE_SECONDS),
            include_subdomains: env_parse("HSTS_INCLUDE_SUBDOMAINS")?.unwrap_or(true),
            preload: env_parse("HSTS_PRELOAD")?.unwrap_or(false),
        };

        let max_request_bytes =
            env_parse("MAX_REQUEST_BYTES")?.unwrap_or(size_limit::DEFAULT_MAX_BYTES);

        let expose_error_details =
            env_parse("EXPOSE_ERROR_DETAILS")?.unwrap_or(!app_env.is_production());

        Ok(Self {
            addr,
            app_env,
            hsts,
            max_request_bytes,
            expose_error_details,
        })
    }
}

/// Parse an optional env var; a present-but-unparseable value is a startup
/// error rather than a silent fallback.
fn env_parse<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(None),
    }
}
