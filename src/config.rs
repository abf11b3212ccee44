use std::{env, str::FromStr};

use serde::{Deserialize, Serialize};

/// Upper bound on `SESSION_TTL_SECS`: thirty days.
pub const MAX_SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub scannable: ScannableConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Zero turns rate limiting off.
    pub rate_limit_per_second: u32,
}

/// The album search / poster rendering service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

/// Where scannable code images come from and how they are drawn.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScannableConfig {
    pub base_url: String,
    pub format: String,
    pub bg_color: String,
    pub code_color: String,
    pub size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub ttl_secs: i64,
    pub cleanup_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["http://localhost:3000".to_string()],
            rate_limit_per_second: 100,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for ScannableConfig {
    fn default() -> Self {
        Self {
            base_url: "https://scannables.scdn.co".to_string(),
            format: "png".to_string(),
            bg_color: "DED8CE".to_string(),
            code_color: "black".to_string(),
            size: 512,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            cleanup_interval_secs: 300,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("PORT")
                    .or_else(|_| env::var("SERVER_PORT"))
                    .ok()
                    .and_then(|port| port.parse().ok())
                    .unwrap_or(defaults.server.port),
                cors_origins: env::var("CORS_ORIGINS")
                    .map(|origins| {
                        origins
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or(defaults.server.cors_origins),
                rate_limit_per_second: parse_or(
                    "RATE_LIMIT_PER_SECOND",
                    defaults.server.rate_limit_per_second,
                ),
            },
            backend: BackendConfig {
                base_url: env::var("BACKEND_URL").unwrap_or(defaults.backend.base_url),
                request_timeout_secs: parse_or(
                    "UPSTREAM_TIMEOUT_SECS",
                    defaults.backend.request_timeout_secs,
                ),
            },
            scannable: ScannableConfig {
                base_url: env::var("SCANNABLE_URL").unwrap_or(defaults.scannable.base_url),
                format: defaults.scannable.format,
                bg_color: env::var("SCANNABLE_BG_COLOR").unwrap_or(defaults.scannable.bg_color),
                code_color: env::var("SCANNABLE_CODE_COLOR")
                    .unwrap_or(defaults.scannable.code_color),
                size: parse_or("SCANNABLE_SIZE", defaults.scannable.size),
            },
            session: SessionConfig {
                ttl_secs: session_ttl_or(
                    env::var("SESSION_TTL_SECS").ok(),
                    defaults.session.ttl_secs,
                ),
                cleanup_interval_secs: parse_or(
                    "SESSION_CLEANUP_INTERVAL_SECS",
                    defaults.session.cleanup_interval_secs,
                ),
            },
        })
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Accepts TTLs in `1..=MAX_SESSION_TTL_SECS`; anything else keeps the default.
fn session_ttl_or(raw: Option<String>, default: i64) -> i64 {
    match raw.as_deref().map(str::trim).map(str::parse::<i64>) {
        None => default,
        Some(Ok(secs)) if (1..=MAX_SESSION_TTL_SECS).contains(&secs) => secs,
        Some(_) => {
            tracing::warn!(
                value = raw.as_deref().unwrap_or_default(),
                "SESSION_TTL_SECS out of range, using {}s",
                default
            );
            default
        }
    }
}
