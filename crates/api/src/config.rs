use std::str::FromStr;

use axum::http::HeaderValue;

/// Which [`promptbook_store::TemplateStore`] backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process store, optionally seeded with demo data.
    Memory,
    /// Remote REST API at `STORE_URL`.
    Http,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Http => "http",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "http" => Ok(StoreBackend::Http),
            other => Err(format!("expected 'memory' or 'http', got '{other}'")),
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store_backend: StoreBackend,
    /// Base URL of the remote store; only read when `store_backend` is `Http`.
    pub store_url: String,
    /// Seed the memory store with demo data (default: `true`).
    pub seed_fixtures: bool,
    /// Simulated latency of a playground run in milliseconds (default: `2000`).
    pub playground_delay_ms: u64,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `3000`                      |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `STORE_BACKEND`        | `memory`                    |
    /// | `STORE_URL`            | `http://localhost:8000/api` |
    /// | `STORE_SEED_FIXTURES`  | `true`                      |
    /// | `PLAYGROUND_DELAY_MS`  | `2000`                      |
    /// | `LOG_FORMAT`           | `pretty`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse("PORT", &var("PORT", "3000"))?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError {
                var: "CORS_ORIGINS",
                reason: format!("'{bad}' is not a valid origin header value"),
            });
        }

        let request_timeout_secs: u64 =
            parse("REQUEST_TIMEOUT_SECS", &var("REQUEST_TIMEOUT_SECS", "30"))?;
        let store_backend = parse("STORE_BACKEND", &var("STORE_BACKEND", "memory"))?;
        let store_url = var("STORE_URL", "http://localhost:8000/api");
        let seed_fixtures =
            parse_flag("STORE_SEED_FIXTURES", &var("STORE_SEED_FIXTURES", "true"))?;
        let playground_delay_ms =
            parse("PLAYGROUND_DELAY_MS", &var("PLAYGROUND_DELAY_MS", "2000"))?;
        let log_format = parse("LOG_FORMAT", &var("LOG_FORMAT", "pretty"))?;

        // A simulated run must finish inside the request timeout.
        if playground_delay_ms >= request_timeout_secs.saturating_mul(1000) {
            return Err(ConfigError {
                var: "PLAYGROUND_DELAY_MS",
                reason: format!(
                    "{playground_delay_ms}ms does not fit in the {request_timeout_secs}s request timeout"
                ),
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            store_url,
            seed_fixtures,
            playground_delay_ms,
            log_format,
        })
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        reason: format!("'{raw}': {e}"),
    })
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            var,
            reason: format!("'{raw}' is not a boolean"),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
