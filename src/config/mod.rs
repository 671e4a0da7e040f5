//! Application configuration.
//!
//! Aggregates configuration from all modules into a single Config struct
//! that can be loaded from YAML files or environment variables.

pub mod cost;

pub use cost::{
    BaseCostOverride, BaseCostPerSqFt, BreakdownOverride, CostBreakdownPercentages,
    CostComponent, CostConstants, CostConstantsOverride, QualityGrade, DEFAULT_COST_CONSTANTS,
};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "buildmart.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "BUILDMART_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "BUILDMART";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "BUILDMART_LOG";

use serde::Deserialize;

use crate::analytics::AnalyticsConfig;

/// Errors raised while loading configuration or cost documents.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Partial cost table merged over the built-in defaults.
    pub cost: CostConstantsOverride,
    /// Analytics store configuration.
    pub analytics: AnalyticsConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `buildmart.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        Ok(config)
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        Self::default()
    }

    /// Default cost table with the configured overrides applied.
    pub fn cost_constants(&self) -> CostConstants {
        DEFAULT_COST_CONSTANTS.merged(&self.cost)
    }
}
