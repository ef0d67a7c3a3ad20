use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stockfeed_generate::OutputFormat;

use crate::CliError;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "stockfeed.toml";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File-level configuration. Command-line flags override every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub output_path: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub catalog_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub low_stock_threshold: Option<i64>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Load settings from `explicit`, or from `stockfeed.toml` when it exists.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, CliError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !default.exists() {
                return Ok(Settings::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> Result<Settings, CliError> {
    let settings: Settings = toml::from_str(content)?;
    if let Some(threshold) = settings.low_stock_threshold
        && threshold < 0
    {
        return Err(CliError::InvalidConfig(
            "low_stock_threshold must be >= 0".to_string(),
        ));
    }
    Ok(settings)
}
