//! Weather provider configuration.

use serde::{Deserialize, Serialize};

/// Weather provider (OpenWeatherMap) configuration
///
/// The API key is provisioned here at startup and treated as process-wide
/// immutable state; nothing mutates it at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherProviderConfig {
    /// OpenWeatherMap API key
    #[serde(default)]
    pub api_key: String,

    /// City queried for every request
    #[serde(default = "default_city")]
    pub city: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cron expression for the nightly cache refresh
    /// (6 fields: sec min hour day month weekday; default 01:00 daily)
    #[serde(default = "default_refresh_cron")]
    pub refresh_cron: String,
}

fn default_city() -> String {
    "seoul".to_string()
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_refresh_cron() -> String {
    "0 0 1 * * *".to_string()
}

impl Default for WeatherProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            city: default_city(),
            base_url: default_base_url(),
            refresh_cron: default_refresh_cron(),
        }
    }
}
