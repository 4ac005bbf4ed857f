//! Configuration loading
//!
//! Layers, lowest priority first: embedded defaults, the user config file,
//! an explicit `--config` file, then `EXECDASH_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::services::MAX_WINDOW_DAYS;
use crate::types::{DashboardError, Result};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub dashboard: DashboardSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    /// Trailing days in the daily series
    pub window_days: u32,
    /// Models shown in the usage ranking
    pub model_limit: usize,
    /// Execution logs requested per refresh
    pub log_limit: usize,
    /// Model label width in the usage chart
    pub label_max_len: usize,
    pub currency_symbol: String,
    /// Render charts; cards are always rendered
    pub charts: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(DashboardError::Config("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(DashboardError::Config("api.timeout_secs must be positive".into()));
        }
        if !(1..=MAX_WINDOW_DAYS).contains(&self.dashboard.window_days) {
            return Err(DashboardError::Config(format!(
                "dashboard.window_days must be between 1 and {}",
                MAX_WINDOW_DAYS
            )));
        }
        Ok(())
    }
}

/// Default user config path (e.g. ~/.config/execdash/config.toml)
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "execdash")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Default log file used when the TUI owns the terminal
pub fn default_log_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "execdash")
        .map(|dirs| dirs.data_local_dir().join("execdash.log"))
}

/// Load configuration from all layers
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    load_layers(user_config_path().as_deref(), explicit, true)
}

fn load_layers(user: Option<&Path>, explicit: Option<&Path>, with_env: bool) -> Result<AppConfig> {
    let mut builder =
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    if let Some(user) = user {
        builder = builder.add_source(File::from(user).required(false));
    }
    if let Some(explicit) = explicit {
        builder = builder.add_source(File::from(explicit).required(true));
    }
    if with_env {
        // prefix_separator("_") so EXECDASH_API__BASE_URL maps to api.base_url
        builder = builder.add_source(
            Environment::with_prefix("EXECDASH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
    }

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
