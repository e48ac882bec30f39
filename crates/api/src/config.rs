//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VOICEFORGE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`).
//!   When neither is set the API runs without storage: CMS reads return empty
//!   lists and lead submissions fail.
//! - `DATABASE_NAME` - Database to use within the server (default: from the URL)
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_TRACES_SAMPLE_RATE` - Fraction of requests traced (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8000";

/// Primary name of the storage connection variable.
pub const DATABASE_URL_VAR: &str = "VOICEFORGE_DATABASE_URL";
/// Generic fallback set by most hosting platforms.
pub const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Document store connection settings
    pub storage: StorageConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Document store connection settings.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Connection string (contains password). `None` disables storage.
    pub database_url: Option<SecretString>,
    /// Database to select within the server, overriding the URL.
    pub database_name: Option<String>,
}

impl StorageConfig {
    /// Whether a connection string was provided.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.database_url.is_some()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            storage: StorageConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.parse_or_default::<IpAddr>("HOST", DEFAULT_HOST)?;
        let port = env.parse_or_default::<u16>("PORT", DEFAULT_PORT)?;

        let storage = StorageConfig {
            database_url: env.database_url(),
            database_name: env.optional("DATABASE_NAME"),
        };

        let sentry_traces_sample_rate =
            env.parse_or_default::<f32>("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;
        if !(0.0..=1.0).contains(&sentry_traces_sample_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "SENTRY_TRACES_SAMPLE_RATE".to_string(),
                "must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            storage,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self) -> Option<SecretString> {
        self.optional(DATABASE_URL_VAR)
            .or_else(|| self.optional(FALLBACK_DATABASE_URL_VAR))
            .map(SecretString::from)
    }
}
