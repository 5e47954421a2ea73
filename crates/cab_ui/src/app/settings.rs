//! Load/save of the small JSON settings file kept next to the app.
//!
//! Missing file means defaults; a malformed file is reported as a
//! recoverable error so the caller can fall back to defaults. Saves are
//! atomic (temp file, then rename).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE_NAME: &str = "cab_app.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub roster_path: String,
    pub geocoder_endpoint: String,
    pub pickup_address: String,
    pub destination_address: String,
    pub map_output_path: String,
    /// Fixed seed for the offer scatter; `None` draws from entropy.
    pub offer_seed: Option<u64>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            roster_path: "driver_details_with_location.csv".to_string(),
            geocoder_endpoint: cab_core::geocode::DEFAULT_ENDPOINT.to_string(),
            pickup_address: "Porur, Chennai, India".to_string(),
            destination_address: "Poonamallee, Chennai, India".to_string(),
            map_output_path: "cab_map.html".to_string(),
            offer_seed: None,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(String),
    InvalidFormat(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "settings file I/O error: {msg}"),
            SettingsError::InvalidFormat(msg) => write!(f, "settings file is malformed: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
    let cwd = std::env::current_dir()
        .map_err(|err| SettingsError::Io(format!("failed to read current directory: {err}")))?;
    Ok(cwd.join(SETTINGS_FILE_NAME))
}

pub fn load_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let contents = fs::read_to_string(path).map_err(|err| SettingsError::Io(err.to_string()))?;
    serde_json::from_str(&contents).map_err(|err| SettingsError::InvalidFormat(err.to_string()))
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    let payload = serde_json::to_string_pretty(settings)
        .map_err(|err| SettingsError::InvalidFormat(err.to_string()))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload).map_err(|err| SettingsError::Io(err.to_string()))?;
    fs::rename(&tmp_path, path).map_err(|err| SettingsError::Io(err.to_string()))
}
