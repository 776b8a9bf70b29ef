//! Configuration loaded from environment variables.
//!
//! # Server (`StorefrontConfig`)
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_PATH` - JSON data file (default: data/storefront.json)
//! - `STOREFRONT_CATALOG_SIZE` - Products generated when the data file has no catalog (default: 100)
//! - `STOREFRONT_CATALOG_SEED` - Seed for that generation (optional)
//! - `STOREFRONT_SESSION_TTL_HOURS` - Session token lifetime (default: 168)
//! - `STOREFRONT_CORS_ORIGIN` - Allowed browser origin (optional)
//! - `SENTRY_DSN` - Sentry error tracking DSN (optional)
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (optional)
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - 0.0 to 1.0 (default: 1.0)
//!
//! # Client (`ClientConfig`)
//!
//! - `FASHION_CUBE_API_URL` - Storefront API root (default: <http://localhost:3000>)
//! - `FASHION_CUBE_API_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `FASHION_CUBE_LOCAL_STORE` - Fallback store file (default: .fashion-cube/local.json)
//! - `FASHION_CUBE_CATALOG_SIZE` - Offline catalog size (default: 1000)
//! - `FASHION_CUBE_CATALOG_SEED` - Offline catalog seed (optional)

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::catalog::generator::{DEFAULT_CLIENT_SIZE, DEFAULT_SEED_SIZE};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

// =============================================================================
// Server
// =============================================================================

/// API server configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// JSON file holding users, carts and the catalog
    pub data_path: PathBuf,
    /// Products to generate if the data file has no catalog yet
    pub catalog_size: usize,
    /// Seed for catalog generation
    pub catalog_seed: Option<u64>,
    /// How long an issued session token stays valid
    pub session_ttl: Duration,
    /// Origin allowed by CORS (no CORS layer when unset)
    pub cors_origin: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let data_path = PathBuf::from(get_env_or_default(
            "STOREFRONT_DATA_PATH",
            "data/storefront.json",
        ));
        let catalog_size = parse_env("STOREFRONT_CATALOG_SIZE", &DEFAULT_SEED_SIZE.to_string())?;
        let catalog_seed = parse_optional_env("STOREFRONT_CATALOG_SEED")?;
        let session_ttl_hours: u64 = parse_env("STOREFRONT_SESSION_TTL_HOURS", "168")?;
        let cors_origin = get_optional_env("STOREFRONT_CORS_ORIGIN");
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            data_path,
            catalog_size,
            catalog_seed,
            session_ttl: Duration::from_secs(session_ttl_hours.saturating_mul(3600)),
            cors_origin,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_path: PathBuf::from("data/storefront.json"),
            catalog_size: DEFAULT_SEED_SIZE,
            catalog_seed: None,
            session_ttl: Duration::from_secs(168 * 3600),
            cors_origin: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client-side bridge configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL of the storefront API
    pub api_url: Url,
    /// Timeout applied to every API request
    pub api_timeout: Duration,
    /// File backing the local fallback store
    pub local_store: PathBuf,
    /// Size of the generated offline catalog
    pub catalog_size: usize,
    /// Seed for the offline catalog
    pub catalog_seed: Option<u64>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default(
            "FASHION_CUBE_API_URL",
            "http://localhost:3000",
        ))?;
        let timeout_secs: u64 = parse_env("FASHION_CUBE_API_TIMEOUT_SECS", "30")?;
        let local_store = PathBuf::from(get_env_or_default(
            "FASHION_CUBE_LOCAL_STORE",
            ".fashion-cube/local.json",
        ));
        let catalog_size =
            parse_env("FASHION_CUBE_CATALOG_SIZE", &DEFAULT_CLIENT_SIZE.to_string())?;
        let catalog_seed = parse_optional_env("FASHION_CUBE_CATALOG_SEED")?;

        Ok(Self {
            api_url,
            api_timeout: Duration::from_secs(timeout_secs),
            local_store,
            catalog_size,
            catalog_seed,
        })
    }
}

/// Parse and check the API root URL.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("FASHION_CUBE_API_URL".to_string(), reason);

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("URL must have a host".to_string()));
    }
    Ok(url)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

/// Parse an optional environment variable.
fn parse_optional_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get_optional_env(key)
        .map(|raw| parse_value(key, &raw))
        .transpose()
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
