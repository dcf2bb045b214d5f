//! Application configuration structs
//!
//! Loads configuration from a `.env` file and environment variables.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue("APP_ENV", other.to_string())),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    /// Apply pending migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "store-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_true() -> bool {
    true
}

fn default_requests_per_second() -> u32 {
    20
}

fn default_burst() -> u32 {
    100
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if a required key is missing or a value does not parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .map(|s| s.parse())
                    .transpose()?
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: var("API_HOST").unwrap_or_else(default_host),
                port: match var("API_PORT").or_else(|| var("PORT")) {
                    Some(raw) => parse_value("API_PORT", &raw)?,
                    None => default_port(),
                },
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    var("DATABASE_MAX_CONNECTIONS"),
                    default_max_connections,
                )?,
                min_connections: parse_or(
                    "DATABASE_MIN_CONNECTIONS",
                    var("DATABASE_MIN_CONNECTIONS"),
                    default_min_connections,
                )?,
                acquire_timeout_secs: parse_or(
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    var("DATABASE_ACQUIRE_TIMEOUT_SECS"),
                    default_acquire_timeout_secs,
                )?,
                run_migrations: parse_or(
                    "DATABASE_RUN_MIGRATIONS",
                    var("DATABASE_RUN_MIGRATIONS"),
                    default_true,
                )?,
                migrations_dir: var("DATABASE_MIGRATIONS_DIR")
                    .unwrap_or_else(default_migrations_dir),
            },
            rate_limit: RateLimitConfig {
                enabled: parse_or("RATE_LIMIT_ENABLED", var("RATE_LIMIT_ENABLED"), default_true)?,
                requests_per_second: parse_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    var("RATE_LIMIT_REQUESTS_PER_SECOND"),
                    default_requests_per_second,
                )?,
                burst: parse_or("RATE_LIMIT_BURST", var("RATE_LIMIT_BURST"), default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key, raw.to_string()))
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: fn() -> T,
) -> Result<T, ConfigError> {
    raw.map_or_else(|| Ok(default()), |raw| parse_value(key, &raw))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
