//! API server configuration

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Source};
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `CLIMATE_API__DATABASE_URL`
pub const ENV_PREFIX: &str = "CLIMATE_API";

/// Base name of the optional config file (`climate-api.toml`, `.yaml`, ...)
pub const CONFIG_FILE: &str = "climate-api";

/// How the tobs cutoff and default range end are chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoffPolicy {
    /// Use `tobs_start` and `range_end` as configured
    Fixed,
    /// Derive both from the latest date in the dataset
    Latest,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// SQLite database URL
    pub database_url: String,
    /// Address the API listens on
    pub bind_address: String,
    /// Pooled database connections
    pub max_connections: u32,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Prometheus exporter address; no exporter when unset
    pub metrics_address: Option<String>,
    pub cutoff_policy: CutoffPolicy,
    /// First date served by the tobs route under the fixed policy
    pub tobs_start: String,
    /// Default end of a temperature range under the fixed policy
    pub range_end: String,
    /// Size of the tobs window under the latest policy
    pub lookback_days: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://Resources/hawaii.sqlite".to_string(),
            bind_address: "127.0.0.1:5000".to_string(),
            max_connections: 5,
            log_level: "info".to_string(),
            metrics_address: None,
            cutoff_policy: CutoffPolicy::Fixed,
            tobs_start: "2016-08-23".to_string(),
            range_end: "2017-08-23".to_string(),
            lookback_days: 365,
        }
    }
}

impl ApiConfig {
    /// Load defaults, then `climate-api.*` if present, then `CLIMATE_API__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder_with(File::with_name(CONFIG_FILE).required(false))?
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Defaults overlaid with one file source
    fn builder_with<S>(file: S) -> Result<ConfigBuilder<DefaultState>, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        Ok(Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("bind_address", defaults.bind_address)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("log_level", defaults.log_level)?
            .set_default("cutoff_policy", "fixed")?
            .set_default("tobs_start", defaults.tobs_start)?
            .set_default("range_end", defaults.range_end)?
            .set_default("lookback_days", defaults.lookback_days)?
            .add_source(file))
    }
}
