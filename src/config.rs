use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::models::Coordinates;
use crate::services::nominatim::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_l1_cache_size")]
    pub l1_cache_size: u64,
}

impl GeocodingSettings {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoding_endpoint(),
            user_agent: default_user_agent(),
            min_interval_ms: default_min_interval_ms(),
            timeout_secs: default_timeout_secs(),
            l1_cache_size: default_l1_cache_size(),
        }
    }
}

fn default_geocoding_endpoint() -> String { DEFAULT_ENDPOINT.to_string() }
fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }
fn default_min_interval_ms() -> u64 { 1000 }
fn default_timeout_secs() -> u64 { 30 }
fn default_l1_cache_size() -> u64 { 10_000 }

/// Map fallback center, used when no property has coordinates
#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_center_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_center_longitude")]
    pub default_longitude: f64,
}

impl MapSettings {
    pub fn default_center(&self) -> Coordinates {
        Coordinates {
            latitude: self.default_latitude,
            longitude: self.default_longitude,
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_latitude: default_center_latitude(),
            default_longitude: default_center_longitude(),
        }
    }
}

// Denver
fn default_center_latitude() -> f64 { 39.7392 }
fn default_center_longitude() -> f64 { -104.9903 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOMESCORE__)
    /// 5. DATABASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOMESCORE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HOMESCORE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }
}

/// Let the conventional DATABASE_URL win over file and prefixed values
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    let builder = Config::builder().add_source(settings);

    match std::env::var("DATABASE_URL") {
        Ok(url) => builder.set_override("database.url", url)?.build(),
        Err(_) => builder.build(),
    }
}
