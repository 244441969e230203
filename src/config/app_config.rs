use config::{Config, Environment, File};
use error_stack::{Report, ResultExt};
use thiserror::Error;

use super::{log_config::LogConfig, sheets_config::SpreadsheetConfig};

pub const CONFIG_PATH_VAR: &str = "GNOSIS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "Config";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file")]
    Read,
    #[error("Failed to deserialize config")]
    Deserialize,
}

impl AppConfig {
    /// Loads the file named by `GNOSIS_CONFIG` (default `Config`, any extension `config` knows),
    /// then applies `GNOSIS__SECTION__KEY` environment overrides.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(config_path))
            .add_source(Environment::with_prefix("GNOSIS").separator("__"))
            .build()
            .change_context(ConfigError::Read)
            .attach_printable_lazy(|| format!("Config file: {config_path}"))?;

        Self::from_config(config)
            .attach_printable_lazy(|| format!("Config file: {config_path}"))
    }

    pub fn from_config(config: Config) -> error_stack::Result<Self, ConfigError> {
        config.try_deserialize::<AppConfig>().map_err(|error| {
            Report::new(error)
                .change_context(ConfigError::Deserialize)
                .attach_printable(
                    "Make sure [sheets] has credentials_path and spreadsheet_id set",
                )
        })
    }
}
