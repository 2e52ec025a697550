use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

use crate::models::Assumptions;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub assumptions: AssumptionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON seed file for properties, investors and deal interest
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
    #[serde(default = "default_oversample_factor")]
    pub oversample_factor: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            recommendation_limit: default_recommendation_limit(),
            oversample_factor: default_oversample_factor(),
        }
    }
}

fn default_limit() -> usize { 10 }
fn default_max_limit() -> usize { 100 }
fn default_recommendation_limit() -> usize { 5 }
fn default_oversample_factor() -> usize { 2 }

/// Default letting assumptions, in percent
#[derive(Debug, Clone, Deserialize)]
pub struct AssumptionSettings {
    #[serde(default = "default_void_percentage")]
    pub void_percentage: Decimal,
    #[serde(default = "default_maintenance_percentage")]
    pub maintenance_percentage: Decimal,
    #[serde(default = "default_management_percentage")]
    pub management_percentage: Decimal,
}

impl Default for AssumptionSettings {
    fn default() -> Self {
        Self {
            void_percentage: default_void_percentage(),
            maintenance_percentage: default_maintenance_percentage(),
            management_percentage: default_management_percentage(),
        }
    }
}

impl From<&AssumptionSettings> for Assumptions {
    fn from(settings: &AssumptionSettings) -> Self {
        Self {
            void_percentage: settings.void_percentage,
            maintenance_percentage: settings.maintenance_percentage,
            management_percentage: settings.management_percentage,
        }
    }
}

fn default_void_percentage() -> Decimal { dec!(10) }
fn default_maintenance_percentage() -> Decimal { dec!(5) }
fn default_management_percentage() -> Decimal { dec!(10) }

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
    /// 4. Environment variables (prefixed with SHARIA__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SHARIA__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SHARIA")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
