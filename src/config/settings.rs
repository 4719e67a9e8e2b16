//! User settings for Spendwise
//!
//! Manages the backend origin and display preferences.

use serde::{Deserialize, Serialize};

use super::paths::SpendwisePaths;
use crate::display::is_valid_date_format;
use crate::error::ClientError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for Spendwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Origin of the Spendwise API, e.g. `https://spendwise.example.com`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    ///
    /// Defaults are not written; call [`Settings::save`] to persist them.
    pub fn load_or_create(paths: &SpendwisePaths) -> Result<Self, ClientError> {
        let settings_path = paths.settings_file();
        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let settings: Settings = read_json(&settings_path).map_err(|e| {
            ClientError::Config(format!("Failed to load settings file: {}", e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that cannot be used for display
    pub fn validate(&self) -> Result<(), ClientError> {
        if !is_valid_date_format(&self.date_format) {
            return Err(ClientError::Config(format!(
                "Invalid date_format '{}' in settings file",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendwisePaths) -> Result<(), ClientError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
