use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use eyre::{bail, WrapErr};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use aqscreen_instruments::importance::DEFAULT_FLAT_IMPORTANCE;

pub const BIND_VAR: &str = "AQSCREEN_BIND";
pub const ALLOWED_ORIGINS_VAR: &str = "AQSCREEN_ALLOWED_ORIGINS";
pub const IMPORTANCE_VAR: &str = "AQSCREEN_IMPORTANCE";
pub const LAMBDA_RUNTIME_VAR: &str = "AWS_LAMBDA_RUNTIME_API";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub allowed_origins: AllowedOrigins,
    /// Flat contributing-factor importance.
    pub importance: f64,
    /// Serve through the Lambda runtime instead of a TCP listener.
    pub lambda: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            allowed_origins: AllowedOrigins::Any,
            importance: DEFAULT_FLAT_IMPORTANCE,
            lambda: false,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(BIND_VAR) {
            config.bind = raw
                .trim()
                .parse()
                .wrap_err_with(|| format!("invalid {BIND_VAR}: {raw:?}"))?;
        }

        if let Some(raw) = lookup(ALLOWED_ORIGINS_VAR) {
            config.allowed_origins = parse_origins(&raw)?;
        }

        if let Some(raw) = lookup(IMPORTANCE_VAR) {
            let importance: f64 = raw
                .trim()
                .parse()
                .wrap_err_with(|| format!("invalid {IMPORTANCE_VAR}: {raw:?}"))?;
            if !importance.is_finite() || !(0.0..=1.0).contains(&importance) {
                bail!("{IMPORTANCE_VAR} must be a number in [0, 1], got {importance}");
            }
            config.importance = importance;
        }

        config.lambda = lookup(LAMBDA_RUNTIME_VAR).is_some_and(|v| !v.is_empty());
        Ok(config)
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        match &self.allowed_origins {
            AllowedOrigins::Any => layer.allow_origin(Any),
            AllowedOrigins::List(origins) => {
                layer.allow_origin(AllowOrigin::list(origins.iter().cloned()))
            }
        }
    }
}

fn parse_origins(raw: &str) -> eyre::Result<AllowedOrigins> {
    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if entries.is_empty() || entries.contains(&"*") {
        return Ok(AllowedOrigins::Any);
    }

    let origins = entries
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .wrap_err_with(|| format!("invalid origin in {ALLOWED_ORIGINS_VAR}: {origin:?}"))
        })
        .collect::<eyre::Result<Vec<_>>>()?;
    Ok(AllowedOrigins::List(origins))
}
