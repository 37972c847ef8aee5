//! Configuration management for the tourist safety server and dashboard client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Development signing secret; deployments must override it
pub const DEFAULT_JWT_SECRET: &str = "change-this-secret-in-production";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Name of the running environment, reported by the health endpoint
    pub environment: String,
    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Load the demo fixtures into the in-memory store at startup
    #[serde(default = "default_true")]
    pub seed_on_startup: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    /// When false, role checks on protected routes are logged but not enforced
    #[serde(default = "default_true")]
    pub enforce_roles: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OfflineFallbackConfig {
    pub enabled: bool,
    /// Password accepted when the remote API cannot be reached
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote API, including the `/api/v1` prefix
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Path of the JSON file used as local storage
    pub storage_path: String,
    #[serde(default = "default_true")]
    pub enforce_roles: bool,
    #[serde(default)]
    pub offline_fallback: OfflineFallbackConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // TOURIST_SAFETY_AUTH__JWT_SECRET -> auth.jwt_secret
            .add_source(
                Environment::with_prefix("TOURIST_SAFETY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET").ok())?
            .set_override_option("client.api_base_url", env::var("API_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            environment: "development".to_string(),
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            seed_on_startup: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration_minutes: 30,
            enforce_roles: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for OfflineFallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            password: "password123".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            request_timeout_secs: 10,
            storage_path: ".tourist-safety/storage.json".to_string(),
            enforce_roles: true,
            offline_fallback: OfflineFallbackConfig::default(),
        }
    }
}
