//! Environment overrides for the client settings.
//!
//! Values come from the process environment, which `main` seeds from `.env`
//! via `dotenvy` before anything else runs.

use super::settings::{DEFAULT_SETTINGS_PATH, Settings, load_settings};
use crate::errors::Result;
use std::env::VarError;

/// Overrides `Settings::api_base_url` when set.
pub const API_BASE_URL_VAR: &str = "STOCKSENSE_API_BASE_URL";

/// Points at an alternative settings file.
pub const CONFIG_PATH_VAR: &str = "STOCKSENSE_CONFIG";

/// Unset is `None`; a value that is not valid Unicode is an error.
fn optional_var(
    name: &str,
    value: std::result::Result<String, VarError>,
) -> Result<Option<String>> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => {
            tracing::error!("{} is set but unreadable: {}", name, e);
            Err(e.into())
        }
    }
}

/// Gets the settings file path from the environment or returns the default.
///
/// # Errors
/// Returns [`Error::EnvVar`](crate::errors::Error::EnvVar) if the variable is
/// not valid Unicode.
pub fn get_settings_path() -> Result<String> {
    Ok(optional_var(CONFIG_PATH_VAR, std::env::var(CONFIG_PATH_VAR))?
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string()))
}

/// Applies an API base URL override, ignoring blank values.
#[must_use]
pub fn apply_overrides(mut settings: Settings, api_base_url: Option<String>) -> Settings {
    if let Some(url) = api_base_url.filter(|url| !url.trim().is_empty()) {
        tracing::debug!("Overriding api_base_url from environment: {}", url);
        settings.api_base_url = url;
    }
    settings
}

/// Loads the settings file named by the environment and applies env overrides.
///
/// # Errors
/// Returns an error if the settings file exists but cannot be read or parsed,
/// or if either variable is not valid Unicode.
pub fn load_app_settings() -> Result<Settings> {
    let settings = load_settings(get_settings_path()?)?;
    let api_base_url = optional_var(API_BASE_URL_VAR, std::env::var(API_BASE_URL_VAR))?;
    let settings = apply_overrides(settings, api_base_url);
    tracing::info!("Using backend at {}", settings.api_base_url);
    Ok(settings)
}
